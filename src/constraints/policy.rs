use serde::{Deserialize, Serialize};

const DEFAULT_FORBIDDEN_FUNCTIONS: &[&str] = &[
    "getComputedStyle",
    "setProperty",
    "insertRule",
    "document.write",
];

const DEFAULT_THEME_MARKERS: &[&str] = &[
    "useDesignTokens",
    "useLayoutConfig",
    "useComponentStyle",
    "useCardTheme",
    "var(--",
];

/// Props that must not be set together on one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropCombination {
    pub props: Vec<String>,
    pub reason: String,
}

impl PropCombination {
    pub fn new(props: &[&str], reason: impl Into<String>) -> Self {
        Self {
            props: props.iter().map(|prop| prop.to_string()).collect(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintPolicy {
    pub forbidden_functions: Vec<String>,
    pub theme_markers: Vec<String>,
    pub disallowed_combinations: Vec<PropCombination>,
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        Self {
            forbidden_functions: to_owned(DEFAULT_FORBIDDEN_FUNCTIONS),
            theme_markers: to_owned(DEFAULT_THEME_MARKERS),
            disallowed_combinations: vec![
                PropCombination::new(
                    &["frosted", "background"],
                    "a frosted card derives its background from the card theme",
                ),
                PropCombination::new(
                    &["fullWidth", "width"],
                    "fullWidth already fixes the width",
                ),
                PropCombination::new(
                    &["disabled", "loading"],
                    "a loading control is already inert",
                ),
            ],
        }
    }
}

impl ConstraintPolicy {
    /// Adds extra forbidden functions and theme markers, skipping duplicates.
    pub fn extended(mut self, forbidden_functions: &[String], theme_markers: &[String]) -> Self {
        extend_unique(&mut self.forbidden_functions, forbidden_functions);
        extend_unique(&mut self.theme_markers, theme_markers);
        self
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for value in extra {
        if !value.is_empty() && !target.contains(value) {
            target.push(value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_skips_duplicates_and_blanks() {
        let policy = ConstraintPolicy::default().extended(
            &["setProperty".to_string(), "eval".to_string()],
            &[String::new(), "useTheme".to_string()],
        );
        assert_eq!(
            policy
                .forbidden_functions
                .iter()
                .filter(|name| *name == "setProperty")
                .count(),
            1
        );
        assert!(policy.forbidden_functions.contains(&"eval".to_string()));
        assert_eq!(policy.theme_markers.last().map(String::as_str), Some("useTheme"));
    }

    #[test]
    fn partial_policy_fills_defaults() {
        let policy: ConstraintPolicy =
            serde_json::from_str(r#"{ "forbiddenFunctions": ["eval"] }"#).unwrap();
        assert_eq!(policy.forbidden_functions, vec!["eval".to_string()]);
        assert_eq!(policy.theme_markers, ConstraintPolicy::default().theme_markers);
    }
}
