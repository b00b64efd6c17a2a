use thiserror::Error;

use crate::tree::PathError;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("value at {path:?} does not fit the {kind} config shape")]
    Shape {
        kind: &'static str,
        path: String,
        source: serde_json::Error,
    },
    #[error("{kind} config has no field at {path:?}")]
    UnknownPath { kind: &'static str, path: String },
    #[error("partial {kind} config must be a JSON object")]
    NotAnObject { kind: &'static str },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to serialize config")]
    Serialize(#[from] serde_json::Error),
}
