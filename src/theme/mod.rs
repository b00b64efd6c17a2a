pub mod card;
pub mod components;
pub mod layout;
pub mod tokens;

pub use card::{card_theme_storage_key, CardThemeConfig, DEFAULT_CARD_SCOPE};
pub use components::{
    ComponentKind, ComponentStyle, ComponentStyleConfig, StyleMap, UnknownComponent,
};
pub use layout::{
    Breakpoints, ContainerWidths, ContentLayout, FooterLayout, GridSystem, HeaderLayout,
    LayoutConfig, PageLayout, SidebarBehavior, SidebarLayout, SidebarPosition,
};
pub use tokens::{
    Animation, BorderWidths, Borders, ColorPalette, ColorScale, DesignTokens, FontFamilies,
    FontSizeScale, FontWeights, LineHeights, MotionPreset, RadiusPreset, RadiusScale, ShadowScale,
    SpacingScale, Typography,
};
