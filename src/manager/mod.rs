pub mod error;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub use error::{ConfigError, ConfigResult};

use crate::tree::{self, ConfigTree, ExportFormat};

type Listener<T> = Box<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns one configuration tree and notifies subscribers after every change.
pub struct ConfigManager<T: ConfigTree> {
    config: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T: ConfigTree> ConfigManager<T> {
    pub fn new(config: T) -> Self {
        Self {
            config,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &T {
        &self.config
    }

    /// Reads the value at a dot-separated path, or `None` if it does not exist.
    pub fn get_config(&self, path: &str) -> Option<Value> {
        let raw = serde_json::to_value(&self.config).ok()?;
        tree::get_nested_value(&raw, path).cloned()
    }

    /// Assigns a value at a dot-separated path.
    ///
    /// The write is checked against the typed tree: a value of the wrong type
    /// fails with [`ConfigError::Shape`] and a path the tree has no field for
    /// fails with [`ConfigError::UnknownPath`]. The tree is left untouched on
    /// error.
    pub fn set_config(&mut self, path: &str, value: impl Serialize) -> ConfigResult<()> {
        let value = serde_json::to_value(value)?;
        let mut raw = serde_json::to_value(&self.config)?;
        tree::set_nested_value(&mut raw, path, value.clone())?;

        let next: T = serde_json::from_value(raw).map_err(|source| ConfigError::Shape {
            kind: T::KIND,
            path: path.to_string(),
            source,
        })?;

        let normalized = serde_json::to_value(&next)?;
        let kept = tree::get_nested_value(&normalized, path)
            .is_some_and(|stored| contains_value(stored, &value));
        if !kept {
            return Err(ConfigError::UnknownPath {
                kind: T::KIND,
                path: path.to_string(),
            });
        }

        tracing::debug!(kind = T::KIND, path, "config value set");
        self.config = next;
        self.notify();
        Ok(())
    }

    /// Shallow-merges `partial` into the top level of the tree. Nested objects
    /// in `partial` replace their counterparts wholesale; fields they omit fall
    /// back to defaults.
    pub fn update_config(&mut self, partial: Value) -> ConfigResult<()> {
        let Value::Object(partial) = partial else {
            return Err(ConfigError::NotAnObject { kind: T::KIND });
        };

        let mut raw = serde_json::to_value(&self.config)?;
        tree::merge_shallow(&mut raw, partial)?;
        let next: T = serde_json::from_value(raw).map_err(|source| ConfigError::Shape {
            kind: T::KIND,
            path: String::new(),
            source,
        })?;

        self.config = next;
        self.notify();
        Ok(())
    }

    pub fn replace_config(&mut self, config: T) {
        self.config = config;
        self.notify();
    }

    /// Applies a typed in-place edit.
    pub fn modify(&mut self, edit: impl FnOnce(&mut T)) {
        edit(&mut self.config);
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn generate_css_variables(&self) -> ConfigResult<String> {
        Ok(tree::generate_css_variables(&self.config)?)
    }

    pub fn export(&self, format: ExportFormat) -> ConfigResult<String> {
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&self.config)?),
            ExportFormat::Css => self.generate_css_variables(),
        }
    }

    pub fn export_as(&self, format: &str) -> ConfigResult<String> {
        self.export(format.parse()?)
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.config);
        }
    }
}

impl<T: ConfigTree> Default for ConfigManager<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ConfigTree> fmt::Debug for ConfigManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// True when every field of `expected` is present in `stored` with an equal
/// value. Numbers compare by magnitude so `1` matches `1.0`.
fn contains_value(stored: &Value, expected: &Value) -> bool {
    match (stored, expected) {
        (Value::Object(stored), Value::Object(expected)) => expected.iter().all(|(key, value)| {
            stored
                .get(key)
                .is_some_and(|existing| contains_value(existing, value))
        }),
        (Value::Array(stored), Value::Array(expected)) => {
            stored.len() == expected.len()
                && stored
                    .iter()
                    .zip(expected)
                    .all(|(left, right)| contains_value(left, right))
        }
        (Value::Number(stored), Value::Number(expected)) => stored.as_f64() == expected.as_f64(),
        (stored, expected) => stored == expected,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::theme::{CardThemeConfig, LayoutConfig};

    #[test]
    fn set_config_round_trips_through_get_config() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        manager.set_config("spacing.md", "20px").unwrap();
        manager.set_config("pageLayout.header.height", 72).unwrap();
        manager.set_config("pageLayout.header.sticky", false).unwrap();

        assert_eq!(manager.get_config("spacing.md"), Some(json!("20px")));
        assert_eq!(
            manager.get_config("pageLayout.header.height"),
            Some(json!(72))
        );
        assert_eq!(manager.config().page_layout.header.height, 72);
        assert!(!manager.config().page_layout.header.sticky);
    }

    #[test]
    fn get_config_returns_none_for_missing_path() {
        let manager = ConfigManager::<LayoutConfig>::default();
        assert_eq!(manager.get_config("pageLayout.nope.height"), None);
        assert_eq!(manager.get_config("spacing.md.deeper"), None);
    }

    #[test]
    fn set_config_rejects_wrong_type_without_mutating() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let before = manager.config().clone();

        let err = manager
            .set_config("pageLayout.header.height", "tall")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Shape { .. }));
        assert_eq!(manager.config(), &before);
    }

    #[test]
    fn set_config_rejects_paths_outside_the_schema() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let err = manager.set_config("pageLayout.banner.height", 10).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPath { .. }));
        assert_eq!(manager.get_config("pageLayout.banner"), None);
    }

    #[test]
    fn set_config_accepts_integer_for_float_field() {
        let mut manager = ConfigManager::<CardThemeConfig>::default();
        manager.set_config("frostedOpacity", 1).unwrap();
        assert_eq!(manager.config().frosted_opacity, 1.0);
    }

    #[test]
    fn update_config_replaces_nested_objects_and_fills_defaults() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        manager.set_config("spacing.lg", "40px").unwrap();

        manager
            .update_config(json!({ "spacing": { "md": "999px" } }))
            .unwrap();

        assert_eq!(manager.get_config("spacing.md"), Some(json!("999px")));
        // spacing was replaced wholesale, so lg falls back to its default
        assert_eq!(
            manager.get_config("spacing.lg"),
            Some(json!(LayoutConfig::default().spacing.lg))
        );
    }

    #[test]
    fn update_config_is_idempotent() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let partial = json!({
            "gridSystem": { "columns": 16, "gutter": 20 },
            "spacing": { "md": "8px" }
        });

        manager.update_config(partial.clone()).unwrap();
        let first = manager.config().clone();
        manager.update_config(partial).unwrap();
        assert_eq!(manager.config(), &first);
    }

    #[test]
    fn update_config_rejects_non_object_partial() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let err = manager.update_config(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { kind: "layout" }));
    }

    #[test]
    fn subscribers_are_notified_until_unsubscribed() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = manager.subscribe(move |config: &LayoutConfig| {
            sink.borrow_mut().push(config.page_layout.header.height);
        });

        manager.set_config("pageLayout.header.height", 60).unwrap();
        manager.modify(|config| config.page_layout.header.height = 70);
        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        manager.set_config("pageLayout.header.height", 80).unwrap();

        assert_eq!(*seen.borrow(), vec![60, 70]);
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn failed_writes_do_not_notify() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        manager.subscribe(move |_: &LayoutConfig| *counter.borrow_mut() += 1);

        assert!(manager.set_config("gridSystem.columns", "many").is_err());
        assert!(manager.update_config(json!("nope")).is_err());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn json_export_round_trips_to_equal_tree() {
        let mut manager = ConfigManager::<LayoutConfig>::default();
        manager.set_config("gridSystem.columns", 16).unwrap();

        let exported = manager.export(ExportFormat::Json).unwrap();
        assert!(exported.contains("\n  \"pageLayout\""));
        let parsed: LayoutConfig = serde_json::from_str(&exported).unwrap();
        assert_eq!(&parsed, manager.config());
    }

    #[test]
    fn css_export_declares_each_top_level_scalar_once() {
        let manager = ConfigManager::<CardThemeConfig>::default();
        let css = manager.export_as("css").unwrap();
        assert!(css.starts_with(":root {"));
        assert!(css.ends_with('}'));

        let config = manager.config();
        for (name, value) in [
            ("--card-background", config.background.clone()),
            ("--card-title-color", config.title_color.clone()),
            ("--card-text-color", config.text_color.clone()),
            ("--card-frosted-opacity", config.frosted_opacity.to_string()),
        ] {
            let declaration = format!("{name}: {value};");
            assert_eq!(css.matches(&declaration).count(), 1, "{declaration}");
        }
    }

    #[test]
    fn export_as_rejects_unknown_format() {
        let manager = ConfigManager::<LayoutConfig>::default();
        let err = manager.export_as("xml").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported format: xml");
    }
}
