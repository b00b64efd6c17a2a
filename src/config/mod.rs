use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constraints::ConstraintPolicy;
use crate::theme::DEFAULT_CARD_SCOPE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "aino";
const APP_CONFIG_FILE: &str = "config.json";
const STORAGE_DIR: &str = "storage";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_dir: Option<PathBuf>,
    pub card_theme_scope: String,
    pub forbidden_functions: Vec<String>,
    pub theme_markers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            card_theme_scope: DEFAULT_CARD_SCOPE.to_string(),
            forbidden_functions: Vec::new(),
            theme_markers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// The configured storage directory, or `<config root>/aino/storage`.
    pub fn storage_dir(&self) -> Result<PathBuf, ConfigPathError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        let (xdg_config_home, home) = config_env_dirs();
        default_storage_dir(xdg_config_home.as_deref(), home.as_deref())
    }

    /// The default lint policy with this config's extra entries appended.
    pub fn constraint_policy(&self) -> ConstraintPolicy {
        ConstraintPolicy::default().extended(&self.forbidden_functions, &self.theme_markers)
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn default_storage_dir(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    app_config_path(APP_DIR, STORAGE_DIR, xdg_config_home, home)
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
