use serde::Serialize;
use serde_json::Value;

use crate::manager::{ConfigManager, ConfigResult, SubscriptionId};
use crate::state::{Lifecycle, ProviderEvent, ProviderState, StateResult};
use crate::storage::KeyValueStore;
use crate::theme::{
    card_theme_storage_key, CardThemeConfig, ComponentStyleConfig, DesignTokens, LayoutConfig,
};
use crate::tree::{ConfigTree, ExportFormat};

pub type LayoutConfigProvider<S> = ConfigProvider<LayoutConfig, S>;
pub type ComponentStyleProvider<S> = ConfigProvider<ComponentStyleConfig, S>;
pub type DesignTokensProvider<S> = ConfigProvider<DesignTokens, S>;
pub type CardThemeProvider<S> = ConfigProvider<CardThemeConfig, S>;

/// Owns one [`ConfigManager`] and keeps it synchronised with a key in a
/// [`KeyValueStore`].
///
/// Storage failures never surface to callers: a provider whose store cannot
/// be read or written keeps working in memory and logs a warning.
#[derive(Debug)]
pub struct ConfigProvider<T: ConfigTree, S: KeyValueStore> {
    manager: ConfigManager<T>,
    store: S,
    key: String,
    lifecycle: Lifecycle,
}

impl<T: ConfigTree, S: KeyValueStore> ConfigProvider<T, S> {
    /// Creates an unhydrated provider holding the built-in default tree.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self::with_config(T::default(), store, key)
    }

    pub fn with_config(config: T, store: S, key: impl Into<String>) -> Self {
        Self {
            manager: ConfigManager::new(config),
            store,
            key: key.into(),
            lifecycle: Lifecycle::new(),
        }
    }

    /// Creates and hydrates a provider under `key`.
    pub fn mount(store: S, key: impl Into<String>) -> StateResult<Self> {
        let mut provider = Self::new(store, key);
        provider.hydrate()?;
        Ok(provider)
    }

    /// Mounts under the tree's default storage key.
    pub fn mount_default(store: S) -> StateResult<Self> {
        Self::mount(store, T::STORAGE_KEY)
    }

    /// Reads the persisted blob, merges it over the current tree and marks
    /// the provider ready. Fails only when called more than once.
    pub fn hydrate(&mut self) -> StateResult<()> {
        self.lifecycle.advance(ProviderEvent::BeginHydration)?;

        match self.store.get_item(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(parsed) => {
                    if let Err(err) = self.manager.update_config(parsed) {
                        tracing::warn!(
                            kind = T::KIND,
                            key = %self.key,
                            %err,
                            "persisted config does not fit; using defaults"
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        kind = T::KIND,
                        key = %self.key,
                        %err,
                        "failed to parse persisted config; using defaults"
                    );
                }
            },
            Ok(None) => {
                tracing::debug!(kind = T::KIND, key = %self.key, "no persisted config");
            }
            Err(err) => {
                tracing::warn!(
                    kind = T::KIND,
                    key = %self.key,
                    %err,
                    "failed to read persisted config; using defaults"
                );
            }
        }

        self.lifecycle.advance(ProviderEvent::FinishHydration)?;
        tracing::debug!(
            kind = T::KIND,
            key = %self.key,
            lifecycle = %self.lifecycle,
            "provider hydrated"
        );
        self.persist();
        Ok(())
    }

    pub fn state(&self) -> ProviderState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &T {
        self.manager.config()
    }

    pub fn get_config(&self, path: &str) -> Option<Value> {
        self.manager.get_config(path)
    }

    pub fn set_config(&mut self, path: &str, value: impl Serialize) -> ConfigResult<()> {
        self.manager.set_config(path, value)?;
        self.persist();
        Ok(())
    }

    pub fn update_config(&mut self, partial: Value) -> ConfigResult<()> {
        self.manager.update_config(partial)?;
        self.persist();
        Ok(())
    }

    pub fn replace_config(&mut self, config: T) {
        self.manager.replace_config(config);
        self.persist();
    }

    pub fn modify(&mut self, edit: impl FnOnce(&mut T)) {
        self.manager.modify(edit);
        self.persist();
    }

    /// Swaps in a named preset. Unknown names leave the tree untouched and
    /// return `false`.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match T::preset(name) {
            Some(preset) => {
                tracing::debug!(kind = T::KIND, preset = name, "applying preset");
                self.replace_config(preset);
                true
            }
            None => {
                tracing::debug!(kind = T::KIND, preset = name, "unknown preset ignored");
                false
            }
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        self.manager.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.manager.unsubscribe(id)
    }

    pub fn generate_css_variables(&self) -> ConfigResult<String> {
        self.manager.generate_css_variables()
    }

    pub fn export(&self, format: ExportFormat) -> ConfigResult<String> {
        self.manager.export(format)
    }

    pub fn export_as(&self, format: &str) -> ConfigResult<String> {
        self.manager.export_as(format)
    }

    /// Writes the tree to the store. Returns whether the write happened.
    fn persist(&self) -> bool {
        if !self.state().is_ready() {
            tracing::debug!(kind = T::KIND, state = ?self.state(), "skip persist before ready");
            return false;
        }

        let serialized = match serde_json::to_string(self.manager.config()) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(kind = T::KIND, %err, "failed to serialize config for storage");
                return false;
            }
        };

        match self.store.set_item(&self.key, &serialized) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    kind = T::KIND,
                    key = %self.key,
                    %err,
                    "failed to persist config; keeping it in memory only"
                );
                false
            }
        }
    }
}

impl<S: KeyValueStore> ConfigProvider<CardThemeConfig, S> {
    /// Mounts a card theme under the page-scoped key `card_theme_<scope>`.
    pub fn mount_scoped(store: S, scope: &str) -> StateResult<Self> {
        Self::mount(store, card_theme_storage_key(scope))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::state::StateError;
    use crate::storage::{MemoryStore, StorageError, StorageResult};

    /// Behaves like `localStorage` in a private-browsing tab.
    #[derive(Debug, Default)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable)
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable)
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn hydration_merges_persisted_blob_and_survives_remount() {
        let store = MemoryStore::new();
        store
            .set_item("aino_layout_config", r#"{"spacing":{"md":"999px"}}"#)
            .unwrap();

        let mut provider = LayoutConfigProvider::mount_default(store.clone()).unwrap();
        assert_eq!(provider.state(), ProviderState::Ready);
        assert_eq!(provider.get_config("spacing.md"), Some(json!("999px")));

        provider
            .update_config(json!({ "spacing": { "md": "8px" } }))
            .unwrap();
        drop(provider);

        let remounted = LayoutConfigProvider::mount_default(store).unwrap();
        assert_eq!(remounted.get_config("spacing.md"), Some(json!("8px")));
    }

    #[test]
    fn missing_blob_keeps_defaults_and_persists_them() {
        let store = MemoryStore::new();
        let provider = LayoutConfigProvider::mount_default(store.clone()).unwrap();

        assert_eq!(provider.config(), &LayoutConfig::default());
        let stored = store.get_item("aino_layout_config").unwrap().unwrap();
        let parsed: LayoutConfig = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, LayoutConfig::default());
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set_item("aino_layout_config", "{ not json").unwrap();
        let provider = LayoutConfigProvider::mount_default(store.clone()).unwrap();
        assert_eq!(provider.config(), &LayoutConfig::default());

        store
            .set_item(
                "aino_layout_config",
                r#"{"pageLayout":{"header":{"height":"tall"}}}"#,
            )
            .unwrap();
        let provider = LayoutConfigProvider::mount_default(store).unwrap();
        assert_eq!(provider.config(), &LayoutConfig::default());
    }

    #[test]
    fn unavailable_storage_degrades_to_memory_only() {
        let mut provider = LayoutConfigProvider::mount_default(FailingStore).unwrap();
        assert_eq!(provider.state(), ProviderState::Ready);

        provider.set_config("gridSystem.columns", 16).unwrap();
        assert!(provider.apply_preset("compact"));
        assert_eq!(provider.config().page_layout.header.height, 56);
    }

    #[test]
    fn apply_preset_replaces_tree_from_built_in_default() {
        let store = MemoryStore::new();
        let mut provider = LayoutConfigProvider::mount_default(store).unwrap();
        provider.set_config("gridSystem.columns", 16).unwrap();

        assert!(provider.apply_preset("compact"));
        assert_eq!(
            provider.get_config("pageLayout.header.height"),
            Some(json!(56))
        );
        // presets are complete trees, so earlier edits do not survive
        assert_eq!(provider.get_config("gridSystem.columns"), Some(json!(12)));
    }

    #[test]
    fn unknown_preset_is_a_silent_no_op() {
        let mut provider = LayoutConfigProvider::mount_default(MemoryStore::new()).unwrap();
        provider.set_config("gridSystem.columns", 16).unwrap();
        let before = provider.config().clone();

        assert!(!provider.apply_preset("enormous"));
        assert_eq!(provider.config(), &before);
    }

    #[test]
    fn writes_before_hydration_are_not_persisted() {
        let store = MemoryStore::new();
        let mut provider = LayoutConfigProvider::new(store.clone(), "aino_layout_config");
        assert_eq!(provider.state(), ProviderState::Uninitialized);

        provider.set_config("gridSystem.columns", 10).unwrap();
        assert!(store.is_empty());

        provider.hydrate().unwrap();
        assert!(store.get_item("aino_layout_config").unwrap().is_some());
        assert_eq!(provider.config().grid_system.columns, 10);
    }

    #[test]
    fn hydrating_twice_is_rejected() {
        let mut provider = LayoutConfigProvider::mount_default(MemoryStore::new()).unwrap();
        let err = provider.hydrate().unwrap_err();
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: ProviderState::Ready,
                event: ProviderEvent::BeginHydration
            }
        ));
        assert_eq!(provider.lifecycle().steps().len(), 2);
        assert_eq!(
            provider.lifecycle().to_string(),
            "Uninitialized -> Hydrating -> Ready"
        );
    }

    #[test]
    fn subscribers_see_every_committed_change() {
        let mut provider = DesignTokensProvider::mount_default(MemoryStore::new()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        provider.subscribe(move |tokens: &DesignTokens| {
            sink.borrow_mut().push(tokens.spacing.md.clone());
        });

        provider.set_config("spacing.md", "12px").unwrap();
        provider.apply_preset("compact");
        assert!(provider.set_config("spacing.md", 12).is_err());

        assert_eq!(*seen.borrow(), vec!["12px".to_string(), "8px".to_string()]);
    }

    #[test]
    fn card_theme_scopes_are_isolated() {
        let store = MemoryStore::new();
        let mut jobs = CardThemeProvider::mount_scoped(store.clone(), "jobs").unwrap();
        jobs.apply_preset("midnight");

        let courses = CardThemeProvider::mount_scoped(store.clone(), "courses").unwrap();
        assert_eq!(courses.config(), &CardThemeConfig::default());
        assert_eq!(jobs.key(), "card_theme_jobs");

        let reloaded = CardThemeProvider::mount_scoped(store, "jobs").unwrap();
        assert_eq!(reloaded.config().background, "#0f172a");
    }

    #[test]
    fn export_passes_through_manager_formats() {
        let provider = CardThemeProvider::mount_default(MemoryStore::new()).unwrap();
        assert!(provider.export(ExportFormat::Css).unwrap().starts_with(":root {"));
        assert!(provider.export_as("json").unwrap().contains("\"titleColor\""));
        assert!(provider.export_as("toml").is_err());
    }
}
