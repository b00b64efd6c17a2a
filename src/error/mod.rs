use std::io;
use std::path::PathBuf;

use crate::config::ConfigPathError;
use crate::constraints::ConstraintError;
use crate::context::ContextError;
use crate::manager::ConfigError;
use crate::state::StateError;
use crate::storage::StorageError;
use crate::tree::PathError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error("cannot locate configuration directory: {0}")]
    ConfigPath(#[from] ConfigPathError),
    #[error("no value at `{path}` in {kind}")]
    MissingValue { kind: &'static str, path: String },
    #[error("unknown {kind} preset `{name}` (available: {available})")]
    UnknownPreset {
        kind: &'static str,
        name: String,
        available: String,
    },
    #[error("failed to read {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidProps {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
