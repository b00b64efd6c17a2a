pub mod css;
pub mod path;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use css::generate_css_variables;
pub use path::{get_nested_value, merge_shallow, set_nested_value, PathError, PathResult};

use crate::manager::ConfigError;

/// A typed configuration tree owned by one manager.
///
/// The tree is serialised to a `serde_json::Value` for path-based access and
/// export; the typed form is the source of truth.
pub trait ConfigTree:
    Serialize + DeserializeOwned + Clone + Default + PartialEq + fmt::Debug + 'static
{
    /// Short name used in logs and on the command line.
    const KIND: &'static str;
    /// Default key the tree is persisted under.
    const STORAGE_KEY: &'static str;
    /// Prefix applied to every generated CSS variable. Empty for none.
    const CSS_NAMESPACE: &'static str = "";

    /// Renames a top-level key when generating CSS variables.
    /// `Some("")` drops the segment entirely.
    fn css_name(_top_level_key: &str) -> Option<&'static str> {
        None
    }

    fn preset_names() -> &'static [&'static str];

    fn preset(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Css,
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(Self::Json),
            "css" => Ok(Self::Css),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Css => f.write_str("css"),
        }
    }
}
