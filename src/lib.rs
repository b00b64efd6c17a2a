pub mod cli;
pub mod config;
pub mod constraints;
pub mod context;
pub mod error;
pub mod facade;
pub mod logging;
pub mod manager;
pub mod provider;
pub mod state;
pub mod storage;
pub mod theme;
pub mod tree;

use std::process::ExitCode;

pub use config::{load_app_config, AppConfig};
pub use constraints::{
    ComponentConstraintReport, ConstraintChecker, ConstraintPolicy, ConstraintViolation, Severity,
    ViolationKind,
};
pub use context::{ContextError, DesignContext};
pub use error::{AppError, AppResult};
pub use facade::{ImportOutcome, UnifiedConfig};
pub use manager::{ConfigError, ConfigManager, SubscriptionId};
pub use provider::{
    CardThemeProvider, ComponentStyleProvider, ConfigProvider, DesignTokensProvider,
    LayoutConfigProvider,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use tree::{ConfigTree, ExportFormat};

/// Entrypoint used by the CLI binary.
pub fn run(cli: cli::Cli) -> AppResult<ExitCode> {
    logging::init();
    let config = load_app_config();
    tracing::debug!(?config, "loaded app config");

    let outcome = cli::execute(cli.command, &config)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }
    Ok(if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
