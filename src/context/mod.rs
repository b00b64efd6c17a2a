use thiserror::Error;

use crate::provider::{
    CardThemeProvider, ComponentStyleProvider, DesignTokensProvider, LayoutConfigProvider,
};
use crate::state::StateResult;
use crate::storage::KeyValueStore;

pub type ContextResult<T> = std::result::Result<T, ContextError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("{hook} must be used within a {provider}")]
    MissingProvider {
        hook: &'static str,
        provider: &'static str,
    },
}

pub(crate) const LAYOUT_MISSING: ContextError = ContextError::MissingProvider {
    hook: "useLayoutConfig",
    provider: "LayoutConfigProvider",
};
pub(crate) const COMPONENT_STYLE_MISSING: ContextError = ContextError::MissingProvider {
    hook: "useComponentStyle",
    provider: "ComponentStyleProvider",
};
pub(crate) const DESIGN_TOKENS_MISSING: ContextError = ContextError::MissingProvider {
    hook: "useDesignTokens",
    provider: "DesignTokensProvider",
};
pub(crate) const CARD_THEME_MISSING: ContextError = ContextError::MissingProvider {
    hook: "useCardTheme",
    provider: "CardThemeProvider",
};

/// The provider tree a page renders inside. Each slot is optional so a
/// subtree can mount only the configuration it needs.
#[derive(Debug)]
pub struct DesignContext<S: KeyValueStore> {
    pub(crate) layout: Option<LayoutConfigProvider<S>>,
    pub(crate) component_style: Option<ComponentStyleProvider<S>>,
    pub(crate) design_tokens: Option<DesignTokensProvider<S>>,
    pub(crate) card_theme: Option<CardThemeProvider<S>>,
}

impl<S: KeyValueStore> Default for DesignContext<S> {
    fn default() -> Self {
        Self {
            layout: None,
            component_style: None,
            design_tokens: None,
            card_theme: None,
        }
    }
}

impl<S: KeyValueStore> DesignContext<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, provider: LayoutConfigProvider<S>) -> Self {
        self.layout = Some(provider);
        self
    }

    pub fn with_component_style(mut self, provider: ComponentStyleProvider<S>) -> Self {
        self.component_style = Some(provider);
        self
    }

    pub fn with_design_tokens(mut self, provider: DesignTokensProvider<S>) -> Self {
        self.design_tokens = Some(provider);
        self
    }

    pub fn with_card_theme(mut self, provider: CardThemeProvider<S>) -> Self {
        self.card_theme = Some(provider);
        self
    }

    pub fn use_layout_config(&mut self) -> ContextResult<&mut LayoutConfigProvider<S>> {
        self.layout.as_mut().ok_or(LAYOUT_MISSING)
    }

    pub fn use_component_style(&mut self) -> ContextResult<&mut ComponentStyleProvider<S>> {
        self.component_style.as_mut().ok_or(COMPONENT_STYLE_MISSING)
    }

    pub fn use_design_tokens(&mut self) -> ContextResult<&mut DesignTokensProvider<S>> {
        self.design_tokens.as_mut().ok_or(DESIGN_TOKENS_MISSING)
    }

    pub fn use_card_theme(&mut self) -> ContextResult<&mut CardThemeProvider<S>> {
        self.card_theme.as_mut().ok_or(CARD_THEME_MISSING)
    }
}

impl<S: KeyValueStore + Clone> DesignContext<S> {
    /// Mounts all four providers against one store. The card theme uses
    /// the key for `card_scope`.
    pub fn mount_all(store: S, card_scope: &str) -> StateResult<Self> {
        Ok(Self::new()
            .with_layout(LayoutConfigProvider::mount_default(store.clone())?)
            .with_component_style(ComponentStyleProvider::mount_default(store.clone())?)
            .with_design_tokens(DesignTokensProvider::mount_default(store.clone())?)
            .with_card_theme(CardThemeProvider::mount_scoped(store, card_scope)?))
    }
}
