use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{
    ContextResult, DesignContext, CARD_THEME_MISSING, COMPONENT_STYLE_MISSING,
    DESIGN_TOKENS_MISSING, LAYOUT_MISSING,
};
use crate::manager::ConfigResult;
use crate::provider::{
    CardThemeProvider, ComponentStyleProvider, DesignTokensProvider, LayoutConfigProvider,
};
use crate::storage::KeyValueStore;
use crate::theme::{CardThemeConfig, ComponentStyleConfig, DesignTokens, LayoutConfig};

const BUNDLE_VERSION: u32 = 1;

const LAYOUT_SECTION: &str = "layout";
const COMPONENT_STYLE_SECTION: &str = "componentStyle";
const DESIGN_TOKENS_SECTION: &str = "designTokens";
const CARD_THEME_SECTION: &str = "cardTheme";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportBundle<'a> {
    version: u32,
    layout: &'a LayoutConfig,
    component_style: &'a ComponentStyleConfig,
    design_tokens: &'a DesignTokens,
    card_theme: &'a CardThemeConfig,
}

/// Result of [`UnifiedConfig::import_all`]. Import never returns an error;
/// failures are reported here instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}

impl ImportOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Every configuration provider of a page, side by side.
pub struct UnifiedConfig<'a, S: KeyValueStore> {
    layout: &'a mut LayoutConfigProvider<S>,
    component_style: &'a mut ComponentStyleProvider<S>,
    design_tokens: &'a mut DesignTokensProvider<S>,
    card_theme: &'a mut CardThemeProvider<S>,
}

impl<S: KeyValueStore> DesignContext<S> {
    /// Borrows all four providers at once. Fails with the first missing
    /// provider's hook error.
    pub fn use_unified_config(&mut self) -> ContextResult<UnifiedConfig<'_, S>> {
        let DesignContext {
            layout,
            component_style,
            design_tokens,
            card_theme,
        } = self;

        Ok(UnifiedConfig {
            layout: layout.as_mut().ok_or(LAYOUT_MISSING)?,
            component_style: component_style.as_mut().ok_or(COMPONENT_STYLE_MISSING)?,
            design_tokens: design_tokens.as_mut().ok_or(DESIGN_TOKENS_MISSING)?,
            card_theme: card_theme.as_mut().ok_or(CARD_THEME_MISSING)?,
        })
    }
}

impl<S: KeyValueStore> UnifiedConfig<'_, S> {
    pub fn layout(&mut self) -> &mut LayoutConfigProvider<S> {
        &mut *self.layout
    }

    pub fn component_style(&mut self) -> &mut ComponentStyleProvider<S> {
        &mut *self.component_style
    }

    pub fn design_tokens(&mut self) -> &mut DesignTokensProvider<S> {
        &mut *self.design_tokens
    }

    pub fn card_theme(&mut self) -> &mut CardThemeProvider<S> {
        &mut *self.card_theme
    }

    pub fn chart_palette(&self) -> Vec<String> {
        self.design_tokens.config().chart_palette()
    }

    /// Serialises every sub-config into one pretty-printed JSON document.
    pub fn export_all(&self) -> ConfigResult<String> {
        let bundle = ExportBundle {
            version: BUNDLE_VERSION,
            layout: self.layout.config(),
            component_style: self.component_style.config(),
            design_tokens: self.design_tokens.config(),
            card_theme: self.card_theme.config(),
        };
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    /// Concatenates the `:root` blocks of every sub-config.
    pub fn export_all_css(&self) -> ConfigResult<String> {
        Ok([
            self.design_tokens.generate_css_variables()?,
            self.layout.generate_css_variables()?,
            self.component_style.generate_css_variables()?,
            self.card_theme.generate_css_variables()?,
        ]
        .join("\n"))
    }

    /// Restores sub-configs from an [`export_all`](Self::export_all) document.
    ///
    /// Every present section is validated before any is applied, so a
    /// document with one bad section changes nothing.
    pub fn import_all(&mut self, serialized: &str) -> ImportOutcome {
        let document: Value = match serde_json::from_str(serialized) {
            Ok(document) => document,
            Err(err) => return ImportOutcome::failed(format!("invalid JSON: {err}")),
        };
        let Some(sections) = document.as_object() else {
            return ImportOutcome::failed("import document must be a JSON object");
        };

        let layout = match section::<LayoutConfig>(sections, LAYOUT_SECTION) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let component_style =
            match section::<ComponentStyleConfig>(sections, COMPONENT_STYLE_SECTION) {
                Ok(value) => value,
                Err(outcome) => return outcome,
            };
        let design_tokens = match section::<DesignTokens>(sections, DESIGN_TOKENS_SECTION) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };
        let card_theme = match section::<CardThemeConfig>(sections, CARD_THEME_SECTION) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };

        let mut restored = Vec::new();
        if let Some(config) = layout {
            self.layout.replace_config(config);
            restored.push(LAYOUT_SECTION);
        }
        if let Some(config) = component_style {
            self.component_style.replace_config(config);
            restored.push(COMPONENT_STYLE_SECTION);
        }
        if let Some(config) = design_tokens {
            self.design_tokens.replace_config(config);
            restored.push(DESIGN_TOKENS_SECTION);
        }
        if let Some(config) = card_theme {
            self.card_theme.replace_config(config);
            restored.push(CARD_THEME_SECTION);
        }

        if restored.is_empty() {
            return ImportOutcome::failed("no configuration sections found");
        }
        tracing::info!(sections = ?restored, "imported configuration");
        ImportOutcome::ok(format!("imported {}", restored.join(", ")))
    }
}

fn section<T: DeserializeOwned>(
    sections: &serde_json::Map<String, Value>,
    name: &str,
) -> Result<Option<T>, ImportOutcome> {
    let Some(raw) = sections.get(name).filter(|value| !value.is_null()) else {
        return Ok(None);
    };
    serde_json::from_value(raw.clone())
        .map(Some)
        .map_err(|err| ImportOutcome::failed(format!("invalid {name} section: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextError;
    use crate::storage::MemoryStore;
    use crate::tree::ConfigTree;

    fn mounted() -> DesignContext<MemoryStore> {
        DesignContext::mount_all(MemoryStore::new(), "default").unwrap()
    }

    #[test]
    fn unified_config_requires_every_provider() {
        let mut context = DesignContext::new()
            .with_layout(LayoutConfigProvider::mount_default(MemoryStore::new()).unwrap());
        let err = context.use_unified_config().err().unwrap();
        assert_eq!(
            err,
            ContextError::MissingProvider {
                hook: "useComponentStyle",
                provider: "ComponentStyleProvider",
            }
        );
    }

    #[test]
    fn export_then_import_restores_every_section() {
        let mut source = mounted();
        let exported = {
            let mut unified = source.use_unified_config().unwrap();
            unified.layout().apply_preset("compact");
            unified.design_tokens().apply_preset("rounded");
            unified.card_theme().set_config("blur", 30).unwrap();
            unified
                .component_style()
                .set_config("tag.base.fontSize", "10px")
                .unwrap();
            unified.export_all().unwrap()
        };

        let mut target = mounted();
        let mut unified = target.use_unified_config().unwrap();
        let outcome = unified.import_all(&exported);
        assert!(outcome.success, "{}", outcome.message);

        assert_eq!(unified.layout().config().page_layout.header.height, 56);
        assert_eq!(
            unified.design_tokens().config(),
            &DesignTokens::preset("rounded").unwrap()
        );
        assert_eq!(unified.card_theme().config().blur, 30);
        assert_eq!(
            unified.component_style().config().tag.base["fontSize"],
            "10px"
        );
    }

    #[test]
    fn import_is_all_or_nothing() {
        let mut context = mounted();
        let mut unified = context.use_unified_config().unwrap();
        let outcome = unified.import_all(
            r#"{ "layout": { "gridSystem": { "columns": 4 } },
                 "cardTheme": { "blur": "heavy" } }"#,
        );

        assert!(!outcome.success);
        assert!(outcome.message.contains("cardTheme"));
        assert_eq!(unified.layout().config().grid_system.columns, 12);
    }

    #[test]
    fn import_reports_malformed_documents() {
        let mut context = mounted();
        let mut unified = context.use_unified_config().unwrap();

        assert!(!unified.import_all("{ nope").success);
        assert!(!unified.import_all("[1, 2]").success);
        let outcome = unified.import_all(r#"{ "unrelated": true }"#);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "no configuration sections found");
    }

    #[test]
    fn export_all_contains_versioned_sections() {
        let mut context = mounted();
        let unified = context.use_unified_config().unwrap();
        let document: Value = serde_json::from_str(&unified.export_all().unwrap()).unwrap();
        assert_eq!(document["version"], 1);
        for name in ["layout", "componentStyle", "designTokens", "cardTheme"] {
            assert!(document.get(name).is_some(), "{name}");
        }
    }

    #[test]
    fn export_all_css_joins_every_root_block() {
        let mut context = mounted();
        let unified = context.use_unified_config().unwrap();
        let css = unified.export_all_css().unwrap();
        assert_eq!(css.matches(":root {").count(), 4);
        assert!(css.contains("--color-primary-500"));
        assert!(css.contains("--card-blur"));
        assert_eq!(unified.chart_palette()[0], "#3b82f6");
    }
}
