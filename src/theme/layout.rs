use serde::{Deserialize, Serialize};

use super::tokens::SpacingScale;
use crate::tree::ConfigTree;

const LAYOUT_CONFIG_KEY: &str = "aino_layout_config";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SidebarPosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SidebarBehavior {
    #[default]
    Fixed,
    Overlay,
    Push,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarLayout {
    pub width: u32,
    pub collapsed_width: u32,
    pub position: SidebarPosition,
    pub behavior: SidebarBehavior,
    pub collapsed: bool,
}

impl Default for SidebarLayout {
    fn default() -> Self {
        Self {
            width: 256,
            collapsed_width: 64,
            position: SidebarPosition::Left,
            behavior: SidebarBehavior::Fixed,
            collapsed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLayout {
    pub height: u32,
    pub sticky: bool,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            height: 64,
            sticky: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLayout {
    pub height: u32,
    pub sticky: bool,
}

impl Default for FooterLayout {
    fn default() -> Self {
        Self {
            height: 48,
            sticky: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentLayout {
    pub max_width: u32,
    pub padding: u32,
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            max_width: 1280,
            padding: 24,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub sidebar: SidebarLayout,
    pub header: HeaderLayout,
    pub footer: FooterLayout,
    pub content: ContentLayout,
}

/// Viewport widths in pixels. Expected to increase from `sm` to `2xl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
    #[serde(rename = "2xl")]
    pub xxl: u32,
}

impl Breakpoints {
    pub fn named(&self) -> [(&'static str, u32); 5] {
        [
            ("sm", self.sm),
            ("md", self.md),
            ("lg", self.lg),
            ("xl", self.xl),
            ("2xl", self.xxl),
        ]
    }

    pub fn is_monotonic(&self) -> bool {
        self.named().windows(2).all(|pair| pair[0].1 < pair[1].1)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: 640,
            md: 768,
            lg: 1024,
            xl: 1280,
            xxl: 1536,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSystem {
    pub columns: u32,
    pub gutter: u32,
    pub breakpoints: Breakpoints,
}

impl Default for GridSystem {
    fn default() -> Self {
        Self {
            columns: 12,
            gutter: 24,
            breakpoints: Breakpoints::default(),
        }
    }
}

/// Maximum container widths per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerWidths {
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
    #[serde(rename = "2xl")]
    pub xxl: u32,
}

impl Default for ContainerWidths {
    fn default() -> Self {
        Self {
            sm: 640,
            md: 768,
            lg: 1024,
            xl: 1280,
            xxl: 1440,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_layout: PageLayout,
    pub grid_system: GridSystem,
    pub containers: ContainerWidths,
    pub spacing: SpacingScale,
}

impl LayoutConfig {
    fn compact() -> Self {
        let defaults = Self::default();
        Self {
            page_layout: PageLayout {
                sidebar: SidebarLayout {
                    width: 200,
                    collapsed_width: 56,
                    ..defaults.page_layout.sidebar
                },
                header: HeaderLayout {
                    height: 56,
                    ..defaults.page_layout.header
                },
                footer: FooterLayout {
                    height: 40,
                    ..defaults.page_layout.footer
                },
                content: ContentLayout {
                    padding: 16,
                    ..defaults.page_layout.content
                },
            },
            grid_system: GridSystem {
                gutter: 16,
                ..defaults.grid_system
            },
            ..defaults
        }
    }

    fn spacious() -> Self {
        let defaults = Self::default();
        Self {
            page_layout: PageLayout {
                sidebar: SidebarLayout {
                    width: 288,
                    ..defaults.page_layout.sidebar
                },
                header: HeaderLayout {
                    height: 72,
                    ..defaults.page_layout.header
                },
                footer: FooterLayout {
                    height: 64,
                    ..defaults.page_layout.footer
                },
                content: ContentLayout {
                    max_width: 1440,
                    padding: 32,
                },
            },
            grid_system: GridSystem {
                gutter: 32,
                ..defaults.grid_system
            },
            ..defaults
        }
    }
}

impl ConfigTree for LayoutConfig {
    const KIND: &'static str = "layout";
    const STORAGE_KEY: &'static str = LAYOUT_CONFIG_KEY;

    fn preset_names() -> &'static [&'static str] {
        &["default", "compact", "spacious"]
    }

    fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "compact" => Some(Self::compact()),
            "spacious" => Some(Self::spacious()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::generate_css_variables;

    #[test]
    fn layout_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(LayoutConfig::default()).unwrap();
        assert_eq!(value["pageLayout"]["header"]["height"], 64);
        assert_eq!(value["pageLayout"]["sidebar"]["collapsedWidth"], 64);
        assert_eq!(value["pageLayout"]["sidebar"]["position"], "left");
        assert_eq!(value["gridSystem"]["breakpoints"]["2xl"], 1536);
        assert_eq!(value["containers"]["2xl"], 1440);
    }

    #[test]
    fn compact_preset_shrinks_chrome_and_keeps_grid_columns() {
        let compact = LayoutConfig::preset("compact").unwrap();
        assert_eq!(compact.page_layout.header.height, 56);
        assert_eq!(compact.grid_system.columns, 12);
        assert_eq!(compact.spacing, SpacingScale::default());
    }

    #[test]
    fn default_breakpoints_are_monotonic() {
        assert!(Breakpoints::default().is_monotonic());
        let broken = Breakpoints {
            lg: 700,
            ..Breakpoints::default()
        };
        assert!(!broken.is_monotonic());
    }

    #[test]
    fn older_shape_blob_deserializes_with_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{ "pageLayout": { "header": { "height": 80 } }, "legacy": 1 }"#)
                .unwrap();
        assert_eq!(config.page_layout.header.height, 80);
        assert!(config.page_layout.header.sticky);
        assert_eq!(config.grid_system, GridSystem::default());
    }

    #[test]
    fn layout_css_variables_are_kebab_cased() {
        let css = generate_css_variables(&LayoutConfig::default()).unwrap();
        assert!(css.contains("  --page-layout-header-height: 64;\n"));
        assert!(css.contains("  --page-layout-content-max-width: 1280;\n"));
        assert!(css.contains("  --grid-system-breakpoints-2xl: 1536;\n"));
        assert!(css.contains("  --spacing-md: 16px;\n"));
    }
}
