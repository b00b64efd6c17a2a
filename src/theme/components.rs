use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::ConfigTree;

const COMPONENT_STYLE_KEY: &str = "aino_component_style_config";

/// Flat CSS property to value map, e.g. `borderRadius -> var(--radius-md)`.
pub type StyleMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Button,
    Input,
    Card,
    Navigation,
    Tag,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Button,
        ComponentKind::Input,
        ComponentKind::Card,
        ComponentKind::Navigation,
        ComponentKind::Tag,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Card => "card",
            Self::Navigation => "navigation",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownComponent;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownComponent(value.to_string()))
    }
}

/// Base style plus named variants and sizes for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentStyle {
    pub base: StyleMap,
    pub variants: BTreeMap<String, StyleMap>,
    pub sizes: BTreeMap<String, StyleMap>,
}

impl ComponentStyle {
    /// Layers base, then the variant, then the size. Unknown variant or size
    /// names contribute nothing.
    pub fn resolve(&self, variant: Option<&str>, size: Option<&str>) -> StyleMap {
        let mut resolved = self.base.clone();
        if let Some(styles) = variant.and_then(|name| self.variants.get(name)) {
            resolved.extend(styles.clone());
        }
        if let Some(styles) = size.and_then(|name| self.sizes.get(name)) {
            resolved.extend(styles.clone());
        }
        resolved
    }
}

fn style(entries: &[(&str, &str)]) -> StyleMap {
    entries
        .iter()
        .map(|(property, value)| (property.to_string(), value.to_string()))
        .collect()
}

fn named(entries: &[(&str, StyleMap)]) -> BTreeMap<String, StyleMap> {
    entries
        .iter()
        .map(|(name, styles)| (name.to_string(), styles.clone()))
        .collect()
}

fn default_button() -> ComponentStyle {
    ComponentStyle {
        base: style(&[
            ("borderRadius", "var(--radius-md)"),
            ("fontWeight", "var(--font-weight-medium)"),
            ("transition", "all var(--animation-duration-fast)"),
        ]),
        variants: named(&[
            (
                "primary",
                style(&[
                    ("background", "var(--color-primary-500)"),
                    ("color", "var(--color-neutral-50)"),
                ]),
            ),
            (
                "secondary",
                style(&[
                    ("background", "var(--color-secondary-100)"),
                    ("color", "var(--color-secondary-700)"),
                ]),
            ),
            (
                "ghost",
                style(&[
                    ("background", "transparent"),
                    ("color", "var(--color-neutral-700)"),
                ]),
            ),
        ]),
        sizes: named(&[
            (
                "sm",
                style(&[
                    ("padding", "var(--spacing-xs) var(--spacing-sm)"),
                    ("fontSize", "var(--font-size-sm)"),
                ]),
            ),
            (
                "md",
                style(&[
                    ("padding", "var(--spacing-sm) var(--spacing-md)"),
                    ("fontSize", "var(--font-size-md)"),
                ]),
            ),
            (
                "lg",
                style(&[
                    ("padding", "var(--spacing-md) var(--spacing-lg)"),
                    ("fontSize", "var(--font-size-lg)"),
                ]),
            ),
        ]),
    }
}

fn default_input() -> ComponentStyle {
    ComponentStyle {
        base: style(&[
            ("borderRadius", "var(--radius-md)"),
            (
                "border",
                "var(--border-width-thin) var(--border-style) var(--color-neutral-300)",
            ),
            ("background", "var(--color-neutral-50)"),
        ]),
        variants: named(&[
            ("outline", style(&[("background", "transparent")])),
            (
                "filled",
                style(&[("background", "var(--color-neutral-100)"), ("border", "none")]),
            ),
        ]),
        sizes: named(&[
            ("sm", style(&[("height", "32px")])),
            ("md", style(&[("height", "40px")])),
            ("lg", style(&[("height", "48px")])),
        ]),
    }
}

fn default_card() -> ComponentStyle {
    ComponentStyle {
        base: style(&[
            ("borderRadius", "var(--radius-lg)"),
            ("boxShadow", "var(--shadow-md)"),
            ("padding", "var(--spacing-lg)"),
        ]),
        variants: named(&[
            ("elevated", style(&[("boxShadow", "var(--shadow-lg)")])),
            (
                "outlined",
                style(&[
                    ("boxShadow", "none"),
                    (
                        "border",
                        "var(--border-width-thin) var(--border-style) var(--color-neutral-200)",
                    ),
                ]),
            ),
            ("frosted", style(&[("backdropFilter", "blur(var(--card-blur))")])),
        ]),
        sizes: named(&[
            ("sm", style(&[("padding", "var(--spacing-md)")])),
            ("lg", style(&[("padding", "var(--spacing-xl)")])),
        ]),
    }
}

fn default_navigation() -> ComponentStyle {
    ComponentStyle {
        base: style(&[
            ("gap", "var(--spacing-sm)"),
            ("color", "var(--color-neutral-600)"),
        ]),
        variants: named(&[
            (
                "tabs",
                style(&[(
                    "borderBottom",
                    "var(--border-width-thin) var(--border-style) var(--color-neutral-200)",
                )]),
            ),
            ("pills", style(&[("borderRadius", "var(--radius-full)")])),
        ]),
        sizes: BTreeMap::new(),
    }
}

fn default_tag() -> ComponentStyle {
    ComponentStyle {
        base: style(&[
            ("borderRadius", "var(--radius-sm)"),
            ("fontSize", "var(--font-size-xs)"),
            ("padding", "0 var(--spacing-sm)"),
        ]),
        variants: named(&[
            (
                "info",
                style(&[
                    ("background", "var(--color-info-100)"),
                    ("color", "var(--color-info-700)"),
                ]),
            ),
            (
                "success",
                style(&[
                    ("background", "var(--color-success-100)"),
                    ("color", "var(--color-success-700)"),
                ]),
            ),
            (
                "warning",
                style(&[
                    ("background", "var(--color-warning-100)"),
                    ("color", "var(--color-warning-700)"),
                ]),
            ),
        ]),
        sizes: BTreeMap::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentStyleConfig {
    pub button: ComponentStyle,
    pub input: ComponentStyle,
    pub card: ComponentStyle,
    pub navigation: ComponentStyle,
    pub tag: ComponentStyle,
}

impl Default for ComponentStyleConfig {
    fn default() -> Self {
        Self {
            button: default_button(),
            input: default_input(),
            card: default_card(),
            navigation: default_navigation(),
            tag: default_tag(),
        }
    }
}

impl ComponentStyleConfig {
    pub fn component(&self, kind: ComponentKind) -> &ComponentStyle {
        match kind {
            ComponentKind::Button => &self.button,
            ComponentKind::Input => &self.input,
            ComponentKind::Card => &self.card,
            ComponentKind::Navigation => &self.navigation,
            ComponentKind::Tag => &self.tag,
        }
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> &mut ComponentStyle {
        match kind {
            ComponentKind::Button => &mut self.button,
            ComponentKind::Input => &mut self.input,
            ComponentKind::Card => &mut self.card,
            ComponentKind::Navigation => &mut self.navigation,
            ComponentKind::Tag => &mut self.tag,
        }
    }

    pub fn resolve(
        &self,
        kind: ComponentKind,
        variant: Option<&str>,
        size: Option<&str>,
    ) -> StyleMap {
        self.component(kind).resolve(variant, size)
    }

    fn with_base_override(mut self, property: &str, values: &[(ComponentKind, &str)]) -> Self {
        for (kind, value) in values {
            self.component_mut(*kind)
                .base
                .insert(property.to_string(), value.to_string());
        }
        self
    }

    fn minimal() -> Self {
        let mut config = Self::default().with_base_override(
            "borderRadius",
            &[
                (ComponentKind::Button, "var(--radius-sm)"),
                (ComponentKind::Input, "var(--radius-sm)"),
                (ComponentKind::Card, "var(--radius-sm)"),
            ],
        );
        config
            .card
            .base
            .insert("boxShadow".to_string(), "none".to_string());
        config
    }

    fn rounded() -> Self {
        Self::default().with_base_override(
            "borderRadius",
            &[
                (ComponentKind::Button, "var(--radius-full)"),
                (ComponentKind::Input, "var(--radius-xl)"),
                (ComponentKind::Card, "var(--radius-xl)"),
                (ComponentKind::Tag, "var(--radius-full)"),
            ],
        )
    }
}

impl ConfigTree for ComponentStyleConfig {
    const KIND: &'static str = "components";
    const STORAGE_KEY: &'static str = COMPONENT_STYLE_KEY;

    fn preset_names() -> &'static [&'static str] {
        &["default", "minimal", "rounded"]
    }

    fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "minimal" => Some(Self::minimal()),
            "rounded" => Some(Self::rounded()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_layers_base_variant_then_size() {
        let config = ComponentStyleConfig::default();
        let resolved = config.resolve(ComponentKind::Button, Some("primary"), Some("lg"));

        assert_eq!(resolved["borderRadius"], "var(--radius-md)");
        assert_eq!(resolved["background"], "var(--color-primary-500)");
        assert_eq!(resolved["fontSize"], "var(--font-size-lg)");
    }

    #[test]
    fn resolve_ignores_unknown_variant_and_size() {
        let config = ComponentStyleConfig::default();
        let resolved = config.resolve(ComponentKind::Tag, Some("neon"), Some("huge"));
        assert_eq!(resolved, config.tag.base);
    }

    #[test]
    fn component_kind_parses_from_name() {
        assert_eq!("card".parse::<ComponentKind>(), Ok(ComponentKind::Card));
        let err = "table".parse::<ComponentKind>().unwrap_err();
        assert_eq!(err, UnknownComponent("table".into()));
        assert_eq!(err.to_string(), "unknown component: table");
    }

    #[test]
    fn rounded_preset_only_changes_radius() {
        let rounded = ComponentStyleConfig::preset("rounded").unwrap();
        let defaults = ComponentStyleConfig::default();
        assert_eq!(rounded.button.base["borderRadius"], "var(--radius-full)");
        assert_eq!(rounded.button.variants, defaults.button.variants);
        assert_eq!(rounded.navigation, defaults.navigation);
    }

    #[test]
    fn minimal_preset_drops_card_shadow() {
        let minimal = ComponentStyleConfig::preset("minimal").unwrap();
        assert_eq!(minimal.card.base["boxShadow"], "none");
        assert_eq!(minimal.tag, ComponentStyleConfig::default().tag);
    }
}
