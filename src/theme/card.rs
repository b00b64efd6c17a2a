use serde::{Deserialize, Serialize};

use crate::tree::ConfigTree;

const CARD_THEME_KEY_PREFIX: &str = "card_theme_";
pub const DEFAULT_CARD_SCOPE: &str = "default";

/// Storage key for a page-scoped card theme override.
pub fn card_theme_storage_key(scope: &str) -> String {
    format!("{CARD_THEME_KEY_PREFIX}{scope}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardThemeConfig {
    pub background: String,
    pub title_color: String,
    pub text_color: String,
    pub border_color: String,
    pub frosted_opacity: f64,
    /// Backdrop blur radius in pixels.
    pub blur: u32,
    pub radius: String,
}

impl Default for CardThemeConfig {
    fn default() -> Self {
        Self {
            background: "rgba(255, 255, 255, 0.72)".into(),
            title_color: "#111827".into(),
            text_color: "#4b5563".into(),
            border_color: "rgba(255, 255, 255, 0.4)".into(),
            frosted_opacity: 0.72,
            blur: 12,
            radius: "16px".into(),
        }
    }
}

impl CardThemeConfig {
    fn frosted() -> Self {
        Self {
            background: "rgba(255, 255, 255, 0.35)".into(),
            border_color: "rgba(255, 255, 255, 0.5)".into(),
            frosted_opacity: 0.35,
            blur: 24,
            ..Self::default()
        }
    }

    fn midnight() -> Self {
        Self {
            background: "#0f172a".into(),
            title_color: "#f8fafc".into(),
            text_color: "#cbd5e1".into(),
            border_color: "#1e293b".into(),
            frosted_opacity: 1.0,
            blur: 0,
            ..Self::default()
        }
    }
}

impl ConfigTree for CardThemeConfig {
    const KIND: &'static str = "card";
    const STORAGE_KEY: &'static str = "card_theme_default";
    const CSS_NAMESPACE: &'static str = "card";

    fn preset_names() -> &'static [&'static str] {
        &["default", "frosted", "midnight"]
    }

    fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "frosted" => Some(Self::frosted()),
            "midnight" => Some(Self::midnight()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_derived_from_scope() {
        assert_eq!(card_theme_storage_key("jobs"), "card_theme_jobs");
        assert_eq!(
            card_theme_storage_key(DEFAULT_CARD_SCOPE),
            CardThemeConfig::STORAGE_KEY
        );
    }

    #[test]
    fn card_theme_uses_camel_case_fields() {
        let value = serde_json::to_value(CardThemeConfig::default()).unwrap();
        assert_eq!(value["titleColor"], "#111827");
        assert_eq!(value["frostedOpacity"], 0.72);
    }

    #[test]
    fn midnight_preset_keeps_default_radius() {
        let midnight = CardThemeConfig::preset("midnight").unwrap();
        assert_eq!(midnight.background, "#0f172a");
        assert_eq!(midnight.radius, CardThemeConfig::default().radius);
        assert!(CardThemeConfig::preset("sunset").is_none());
    }
}
