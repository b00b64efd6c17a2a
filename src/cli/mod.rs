use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::config::AppConfig;
use crate::constraints::{ComponentConstraintReport, ConstraintChecker, Severity};
use crate::error::{AppError, AppResult};
use crate::provider::ConfigProvider;
use crate::storage::FileStore;
use crate::theme::{
    card_theme_storage_key, CardThemeConfig, ComponentKind, ComponentStyleConfig, DesignTokens,
    LayoutConfig,
};
use crate::tree::ConfigTree;

#[derive(Debug, Parser)]
#[command(name = "aino-design")]
#[command(about = "Inspect and edit persisted design configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Tokens,
    Layout,
    Components,
    Card,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a configuration as JSON or as CSS variables
    Export {
        kind: Kind,
        /// Output format: json or css
        #[arg(long, default_value = "json")]
        format: String,
        /// Card theme scope (card only)
        #[arg(long)]
        scope: Option<String>,
    },

    /// Print the value at a dot-separated path
    Get {
        kind: Kind,
        path: String,
        #[arg(long)]
        scope: Option<String>,
    },

    /// Set the value at a dot-separated path. Values that are not valid JSON
    /// are stored as strings.
    Set {
        kind: Kind,
        path: String,
        value: String,
        #[arg(long)]
        scope: Option<String>,
    },

    /// Replace a configuration with a named preset
    Preset {
        kind: Kind,
        name: String,
        #[arg(long)]
        scope: Option<String>,
    },

    /// List the preset names of a configuration kind
    Presets { kind: Kind },

    /// Print the resolved style of a component: base, then variant, then size
    Style {
        component: ComponentKind,
        #[arg(long)]
        variant: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },

    /// Lint source files for hard-coded styling. `.json` files are read as
    /// component props.
    Lint {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Emit reports as JSON
        #[arg(long)]
        json: bool,
        /// Also check the stored layout breakpoints
        #[arg(long)]
        layout: bool,
    },
}

/// What a command printed and whether it passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn passed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }
}

pub fn execute(command: Command, config: &AppConfig) -> AppResult<Outcome> {
    let output = match command {
        Command::Export {
            kind,
            format,
            scope,
        } => with_session(config, kind, scope.as_deref(), |session| {
            session.export(&format)
        })?,
        Command::Get { kind, path, scope } => {
            with_session(config, kind, scope.as_deref(), |session| session.get(&path))?
        }
        Command::Set {
            kind,
            path,
            value,
            scope,
        } => with_session(config, kind, scope.as_deref(), |session| {
            session.set(&path, parse_value(&value))
        })?,
        Command::Preset { kind, name, scope } => {
            with_session(config, kind, scope.as_deref(), |session| session.preset(&name))?
        }
        Command::Presets { kind } => preset_names(kind).join("\n"),
        Command::Style {
            component,
            variant,
            size,
        } => {
            let store = open_store(config)?;
            let provider = ConfigProvider::<ComponentStyleConfig, _>::mount(
                store,
                ComponentStyleConfig::STORAGE_KEY,
            )?;
            let resolved = provider
                .config()
                .resolve(component, variant.as_deref(), size.as_deref());
            serde_json::to_string_pretty(&resolved)?
        }
        Command::Lint {
            files,
            json,
            layout,
        } => return lint(config, &files, json, layout),
    };
    Ok(Outcome::passed(output))
}

/// Parses a command-line value as JSON, keeping it as a plain string when
/// it is not valid JSON.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// The storage key a command reads and writes. Card themes fall back to the
/// configured scope.
pub fn storage_key(config: &AppConfig, kind: Kind, scope: Option<&str>) -> String {
    match kind {
        Kind::Tokens => DesignTokens::STORAGE_KEY.to_string(),
        Kind::Layout => LayoutConfig::STORAGE_KEY.to_string(),
        Kind::Components => ComponentStyleConfig::STORAGE_KEY.to_string(),
        Kind::Card => card_theme_storage_key(scope.unwrap_or(&config.card_theme_scope)),
    }
}

/// The operations every configuration kind supports, independent of its tree type.
trait Session {
    fn export(&self, format: &str) -> AppResult<String>;
    fn get(&self, path: &str) -> AppResult<String>;
    fn set(&mut self, path: &str, value: Value) -> AppResult<String>;
    fn preset(&mut self, name: &str) -> AppResult<String>;
}

impl<T: ConfigTree> Session for ConfigProvider<T, FileStore> {
    fn export(&self, format: &str) -> AppResult<String> {
        Ok(self.export_as(format)?)
    }

    fn get(&self, path: &str) -> AppResult<String> {
        match self.get_config(path) {
            Some(Value::String(text)) => Ok(text),
            Some(other) => Ok(serde_json::to_string_pretty(&other)?),
            None => Err(AppError::MissingValue {
                kind: T::KIND,
                path: path.to_string(),
            }),
        }
    }

    fn set(&mut self, path: &str, value: Value) -> AppResult<String> {
        self.set_config(path, value)?;
        tracing::info!(kind = T::KIND, path, key = self.key(), "updated configuration");
        Ok(String::new())
    }

    fn preset(&mut self, name: &str) -> AppResult<String> {
        if !self.apply_preset(name) {
            return Err(AppError::UnknownPreset {
                kind: T::KIND,
                name: name.to_string(),
                available: T::preset_names().join(", "),
            });
        }
        tracing::info!(kind = T::KIND, preset = name, "applied preset");
        Ok(String::new())
    }
}

fn with_session(
    config: &AppConfig,
    kind: Kind,
    scope: Option<&str>,
    run: impl FnOnce(&mut dyn Session) -> AppResult<String>,
) -> AppResult<String> {
    let store = open_store(config)?;
    let key = storage_key(config, kind, scope);
    match kind {
        Kind::Tokens => run(&mut ConfigProvider::<DesignTokens, _>::mount(store, key)?),
        Kind::Layout => run(&mut ConfigProvider::<LayoutConfig, _>::mount(store, key)?),
        Kind::Components => {
            run(&mut ConfigProvider::<ComponentStyleConfig, _>::mount(store, key)?)
        }
        Kind::Card => run(&mut ConfigProvider::<CardThemeConfig, _>::mount(store, key)?),
    }
}

fn open_store(config: &AppConfig) -> AppResult<FileStore> {
    let dir = config.storage_dir()?;
    tracing::debug!(dir = %dir.display(), "using storage directory");
    Ok(FileStore::new(dir))
}

fn preset_names(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::Tokens => DesignTokens::preset_names(),
        Kind::Layout => LayoutConfig::preset_names(),
        Kind::Components => ComponentStyleConfig::preset_names(),
        Kind::Card => CardThemeConfig::preset_names(),
    }
}

/// Lints every file, plus the stored layout when `layout` is set. Fails when
/// any report carries an error-severity violation.
pub fn lint(
    config: &AppConfig,
    files: &[PathBuf],
    json: bool,
    layout: bool,
) -> AppResult<Outcome> {
    let checker = ConstraintChecker::new(config.constraint_policy())?;

    let mut reports = Vec::with_capacity(files.len() + 1);
    for file in files {
        reports.push(lint_file(&checker, file)?);
    }
    if layout {
        let store = open_store(config)?;
        let provider = ConfigProvider::<LayoutConfig, _>::mount(store, LayoutConfig::STORAGE_KEY)?;
        reports.push(ComponentConstraintReport::new(
            LayoutConfig::KIND,
            checker.check_layout(provider.config()),
        ));
    }

    let errors: usize = reports
        .iter()
        .map(|report| report.count(Severity::Error))
        .sum();
    tracing::info!(files = files.len(), errors, "lint finished");

    let output = if json {
        serde_json::to_string_pretty(&reports)?
    } else {
        reports.iter().map(render_report).collect::<Vec<_>>().join("\n")
    };
    Ok(Outcome {
        output,
        success: errors == 0,
    })
}

fn lint_file(checker: &ConstraintChecker, file: &Path) -> AppResult<ComponentConstraintReport> {
    let contents = std::fs::read_to_string(file).map_err(|source| AppError::ReadInput {
        path: file.to_path_buf(),
        source,
    })?;
    let name = file.display().to_string();

    if file.extension().is_some_and(|ext| ext == "json") {
        let props: Value =
            serde_json::from_str(&contents).map_err(|source| AppError::InvalidProps {
                path: file.to_path_buf(),
                source,
            })?;
        return Ok(checker.check_component(&name, &props)?);
    }
    Ok(checker.check_source(&name, &contents))
}

fn render_report(report: &ComponentConstraintReport) -> String {
    let mut lines = vec![format!("{} (score {})", report.component, report.score)];
    for violation in &report.violations {
        lines.push(format!(
            "  {:<7} {:<28} {}",
            violation.severity, violation.kind, violation.message
        ));
        lines.push(format!("          {}", violation.suggestion));
    }
    for recommendation in &report.recommendations {
        lines.push(format!("  - {recommendation}"));
    }
    lines.join("\n")
}
