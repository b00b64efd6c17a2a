use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::tree::ConfigTree;

const DESIGN_TOKENS_KEY: &str = "aino_design_tokens";

/// A 50..900 color ramp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScale {
    #[serde(rename = "50")]
    pub shade_50: String,
    #[serde(rename = "100")]
    pub shade_100: String,
    #[serde(rename = "200")]
    pub shade_200: String,
    #[serde(rename = "300")]
    pub shade_300: String,
    #[serde(rename = "400")]
    pub shade_400: String,
    #[serde(rename = "500")]
    pub shade_500: String,
    #[serde(rename = "600")]
    pub shade_600: String,
    #[serde(rename = "700")]
    pub shade_700: String,
    #[serde(rename = "800")]
    pub shade_800: String,
    #[serde(rename = "900")]
    pub shade_900: String,
}

impl ColorScale {
    pub fn from_steps(steps: [&str; 10]) -> Self {
        let [s50, s100, s200, s300, s400, s500, s600, s700, s800, s900] = steps.map(String::from);
        Self {
            shade_50: s50,
            shade_100: s100,
            shade_200: s200,
            shade_300: s300,
            shade_400: s400,
            shade_500: s500,
            shade_600: s600,
            shade_700: s700,
            shade_800: s800,
            shade_900: s900,
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        neutral_scale()
    }
}

fn primary_scale() -> ColorScale {
    ColorScale::from_steps([
        "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8",
        "#1e40af", "#1e3a8a",
    ])
}

fn secondary_scale() -> ColorScale {
    ColorScale::from_steps([
        "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9",
        "#5b21b6", "#4c1d95",
    ])
}

fn neutral_scale() -> ColorScale {
    ColorScale::from_steps([
        "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46",
        "#27272a", "#18181b",
    ])
}

fn success_scale() -> ColorScale {
    ColorScale::from_steps([
        "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d",
        "#166534", "#14532d",
    ])
}

fn warning_scale() -> ColorScale {
    ColorScale::from_steps([
        "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309",
        "#92400e", "#78350f",
    ])
}

fn error_scale() -> ColorScale {
    ColorScale::from_steps([
        "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c",
        "#991b1b", "#7f1d1d",
    ])
}

fn info_scale() -> ColorScale {
    ColorScale::from_steps([
        "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1",
        "#075985", "#0c4a6e",
    ])
}

/// Semantic color ramps. A partially specified ramp keeps the missing
/// steps of its own default ramp, not of the neutral one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub neutral: ColorScale,
    pub success: ColorScale,
    pub warning: ColorScale,
    pub error: ColorScale,
    pub info: ColorScale,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: primary_scale(),
            secondary: secondary_scale(),
            neutral: neutral_scale(),
            success: success_scale(),
            warning: warning_scale(),
            error: error_scale(),
            info: info_scale(),
        }
    }
}

type StepOverrides = Option<Map<String, Value>>;

#[derive(Default, Deserialize)]
#[serde(default)]
struct PaletteOverrides {
    primary: StepOverrides,
    secondary: StepOverrides,
    neutral: StepOverrides,
    success: StepOverrides,
    warning: StepOverrides,
    error: StepOverrides,
    info: StepOverrides,
}

impl<'de> Deserialize<'de> for ColorPalette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = PaletteOverrides::deserialize(deserializer)?;
        let overlay = |base: ColorScale, steps: StepOverrides| {
            overlay_steps(base, steps).map_err(D::Error::custom)
        };
        Ok(Self {
            primary: overlay(primary_scale(), raw.primary)?,
            secondary: overlay(secondary_scale(), raw.secondary)?,
            neutral: overlay(neutral_scale(), raw.neutral)?,
            success: overlay(success_scale(), raw.success)?,
            warning: overlay(warning_scale(), raw.warning)?,
            error: overlay(error_scale(), raw.error)?,
            info: overlay(info_scale(), raw.info)?,
        })
    }
}

fn overlay_steps(base: ColorScale, steps: StepOverrides) -> serde_json::Result<ColorScale> {
    let Some(steps) = steps else {
        return Ok(base);
    };
    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(existing) = &mut merged {
        existing.extend(steps);
    }
    serde_json::from_value(merged)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFamilies {
    pub sans: Vec<String>,
    pub serif: Vec<String>,
    pub mono: Vec<String>,
}

impl Default for FontFamilies {
    fn default() -> Self {
        let family = |names: &[&str]| -> Vec<String> {
            names.iter().map(|name| name.to_string()).collect()
        };
        Self {
            sans: family(&["Inter", "system-ui", "sans-serif"]),
            serif: family(&["Georgia", "serif"]),
            mono: family(&["JetBrains Mono", "monospace"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizeScale {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xxl: String,
    #[serde(rename = "3xl")]
    pub xxxl: String,
}

impl Default for FontSizeScale {
    fn default() -> Self {
        Self {
            xs: "0.75rem".into(),
            sm: "0.875rem".into(),
            md: "1rem".into(),
            lg: "1.125rem".into(),
            xl: "1.25rem".into(),
            xxl: "1.5rem".into(),
            xxxl: "1.875rem".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontWeights {
    pub light: u16,
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

impl Default for FontWeights {
    fn default() -> Self {
        Self {
            light: 300,
            normal: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineHeights {
    pub tight: f64,
    pub normal: f64,
    pub relaxed: f64,
}

impl Default for LineHeights {
    fn default() -> Self {
        Self {
            tight: 1.25,
            normal: 1.5,
            relaxed: 1.75,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font_family: FontFamilies,
    pub font_size: FontSizeScale,
    pub font_weight: FontWeights,
    pub line_height: LineHeights,
}

/// The xs..3xl spacing scale shared by design tokens and layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingScale {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xxl: String,
    #[serde(rename = "3xl")]
    pub xxxl: String,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            xs: "4px".into(),
            sm: "8px".into(),
            md: "16px".into(),
            lg: "24px".into(),
            xl: "32px".into(),
            xxl: "48px".into(),
            xxxl: "64px".into(),
        }
    }
}

impl SpacingScale {
    fn compact() -> Self {
        Self {
            xs: "2px".into(),
            sm: "4px".into(),
            md: "8px".into(),
            lg: "12px".into(),
            xl: "16px".into(),
            xxl: "24px".into(),
            xxxl: "32px".into(),
        }
    }
}

/// Global corner-rounding selector. Applying one rewrites the radius scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RadiusPreset {
    Sharp,
    Subtle,
    #[default]
    Medium,
    Large,
    Pill,
}

impl RadiusPreset {
    /// `sm`, `md`, `lg`, `xl` radii for this preset.
    const fn steps(self) -> [&'static str; 4] {
        match self {
            Self::Sharp => ["0px", "0px", "0px", "0px"],
            Self::Subtle => ["2px", "4px", "6px", "8px"],
            Self::Medium => ["4px", "8px", "12px", "16px"],
            Self::Large => ["6px", "12px", "16px", "24px"],
            Self::Pill => ["9999px", "9999px", "9999px", "9999px"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusScale {
    pub none: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
    pub full: String,
    pub preset: RadiusPreset,
}

impl RadiusScale {
    pub fn for_preset(preset: RadiusPreset) -> Self {
        let [sm, md, lg, xl] = preset.steps().map(String::from);
        Self {
            none: "0px".into(),
            sm,
            md,
            lg,
            xl,
            full: "9999px".into(),
            preset,
        }
    }
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self::for_preset(RadiusPreset::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowScale {
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

impl Default for ShadowScale {
    fn default() -> Self {
        Self {
            sm: "0 1px 2px rgba(0, 0, 0, 0.05)".into(),
            md: "0 4px 6px rgba(0, 0, 0, 0.10)".into(),
            lg: "0 10px 15px rgba(0, 0, 0, 0.10)".into(),
            xl: "0 20px 25px rgba(0, 0, 0, 0.12)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderWidths {
    pub thin: String,
    pub medium: String,
    pub thick: String,
}

impl Default for BorderWidths {
    fn default() -> Self {
        Self {
            thin: "1px".into(),
            medium: "2px".into(),
            thick: "4px".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    pub width: BorderWidths,
    pub style: String,
}

impl Default for Borders {
    fn default() -> Self {
        Self {
            width: BorderWidths::default(),
            style: "solid".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionPreset {
    pub property: String,
    pub duration: String,
    pub easing: String,
}

impl Default for MotionPreset {
    fn default() -> Self {
        motion("opacity", "250ms", STANDARD_EASING)
    }
}

const STANDARD_EASING: &str = "cubic-bezier(0.4, 0, 0.2, 1)";
const DECELERATE_EASING: &str = "cubic-bezier(0, 0, 0.2, 1)";
const ACCELERATE_EASING: &str = "cubic-bezier(0.4, 0, 1, 1)";

fn motion(property: &str, duration: &str, easing: &str) -> MotionPreset {
    MotionPreset {
        property: property.into(),
        duration: duration.into(),
        easing: easing.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub duration: BTreeMap<String, String>,
    pub easing: BTreeMap<String, String>,
    pub presets: BTreeMap<String, MotionPreset>,
}

impl Default for Animation {
    fn default() -> Self {
        let pairs = |entries: &[(&str, &str)]| -> BTreeMap<String, String> {
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        };
        Self {
            duration: pairs(&[("fast", "150ms"), ("normal", "250ms"), ("slow", "400ms")]),
            easing: pairs(&[
                ("standard", STANDARD_EASING),
                ("decelerate", DECELERATE_EASING),
                ("accelerate", ACCELERATE_EASING),
            ]),
            presets: [
                ("fade", motion("opacity", "250ms", STANDARD_EASING)),
                ("slideUp", motion("transform", "250ms", DECELERATE_EASING)),
                ("scale", motion("transform", "150ms", STANDARD_EASING)),
                ("collapse", motion("height", "400ms", ACCELERATE_EASING)),
            ]
            .into_iter()
            .map(|(name, preset)| (name.to_string(), preset))
            .collect(),
        }
    }
}

/// Theme-level design tokens: colors, typography, spacing, radius, shadows,
/// borders and motion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignTokens {
    pub colors: ColorPalette,
    pub typography: Typography,
    pub spacing: SpacingScale,
    pub radius: RadiusScale,
    pub shadows: ShadowScale,
    pub borders: Borders,
    pub animation: Animation,
}

impl DesignTokens {
    pub fn apply_radius_preset(&mut self, preset: RadiusPreset) {
        self.radius = RadiusScale::for_preset(preset);
    }

    /// Palette handed to chart renderers, brand colors first.
    pub fn chart_palette(&self) -> Vec<String> {
        let colors = &self.colors;
        [
            &colors.primary.shade_500,
            &colors.secondary.shade_500,
            &colors.success.shade_500,
            &colors.warning.shade_500,
            &colors.error.shade_500,
            &colors.info.shade_500,
            &colors.primary.shade_300,
            &colors.secondary.shade_300,
        ]
        .into_iter()
        .cloned()
        .collect()
    }

    fn compact() -> Self {
        let mut tokens = Self {
            spacing: SpacingScale::compact(),
            typography: Typography {
                font_size: FontSizeScale {
                    xs: "0.6875rem".into(),
                    sm: "0.75rem".into(),
                    md: "0.875rem".into(),
                    lg: "1rem".into(),
                    xl: "1.125rem".into(),
                    xxl: "1.25rem".into(),
                    xxxl: "1.5rem".into(),
                },
                ..Typography::default()
            },
            ..Self::default()
        };
        tokens.apply_radius_preset(RadiusPreset::Subtle);
        tokens
    }

    fn rounded() -> Self {
        let mut tokens = Self::default();
        tokens.apply_radius_preset(RadiusPreset::Large);
        tokens
    }
}

impl ConfigTree for DesignTokens {
    const KIND: &'static str = "tokens";
    const STORAGE_KEY: &'static str = DESIGN_TOKENS_KEY;

    fn css_name(top_level_key: &str) -> Option<&'static str> {
        match top_level_key {
            "colors" => Some("color"),
            "shadows" => Some("shadow"),
            "borders" => Some("border"),
            "typography" => Some(""),
            _ => None,
        }
    }

    fn preset_names() -> &'static [&'static str] {
        &["default", "compact", "rounded"]
    }

    fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "compact" => Some(Self::compact()),
            "rounded" => Some(Self::rounded()),
            _ => None,
        }
    }
}
