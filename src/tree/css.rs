use serde_json::Value;

use super::ConfigTree;

/// Flattens a config tree into a single `:root { ... }` block of custom
/// properties. Nested keys are kebab-cased and joined with hyphens, so
/// `colors.primary.500` becomes `--color-primary-500` for design tokens.
pub fn generate_css_variables<T: ConfigTree>(tree: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(tree)?;
    let mut declarations = Vec::new();

    if let Value::Object(root) = &value {
        for (key, child) in root {
            let mut segments = Vec::new();
            if !T::CSS_NAMESPACE.is_empty() {
                segments.push(T::CSS_NAMESPACE.to_string());
            }
            match T::css_name(key) {
                Some("") => {}
                Some(renamed) => segments.push(renamed.to_string()),
                None => segments.push(kebab_case(key)),
            }
            collect_declarations(child, &mut segments, &mut declarations);
        }
    }

    let mut css = String::from(":root {\n");
    for (name, value) in declarations {
        css.push_str(&format!("  --{name}: {value};\n"));
    }
    css.push('}');
    Ok(css)
}

fn collect_declarations(
    value: &Value,
    segments: &mut Vec<String>,
    declarations: &mut Vec<(String, String)>,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                segments.push(kebab_case(key));
                collect_declarations(child, segments, declarations);
                segments.pop();
            }
        }
        Value::Null => {}
        leaf => {
            if segments.is_empty() {
                return;
            }
            declarations.push((segments.join("-"), format_leaf(leaf)));
        }
    }
}

fn format_leaf(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_leaf)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub(crate) fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == ' ' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        max_width: u32,
        font_family: Vec<String>,
        nested: Nested,
        hidden: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Nested {
        is_sticky: bool,
        label: String,
    }

    impl ConfigTree for Sample {
        const KIND: &'static str = "sample";
        const STORAGE_KEY: &'static str = "sample";
        const CSS_NAMESPACE: &'static str = "demo";

        fn css_name(top_level_key: &str) -> Option<&'static str> {
            match top_level_key {
                "nested" => Some(""),
                _ => None,
            }
        }

        fn preset_names() -> &'static [&'static str] {
            &[]
        }

        fn preset(_name: &str) -> Option<Self> {
            None
        }
    }

    #[test]
    fn kebab_case_handles_camel_snake_and_numeric_keys() {
        assert_eq!(kebab_case("pageLayout"), "page-layout");
        assert_eq!(kebab_case("collapsedWidth"), "collapsed-width");
        assert_eq!(kebab_case("frosted_opacity"), "frosted-opacity");
        assert_eq!(kebab_case("2xl"), "2xl");
        assert_eq!(kebab_case("500"), "500");
    }

    #[test]
    fn css_output_is_wrapped_in_root_block() {
        let css = generate_css_variables(&Sample::default()).unwrap();
        assert!(css.starts_with(":root {"));
        assert!(css.ends_with('}'));
    }

    #[test]
    fn css_output_flattens_renames_and_skips_nulls() {
        let sample = Sample {
            max_width: 1200,
            font_family: vec!["Inter".into(), "sans-serif".into()],
            nested: Nested {
                is_sticky: true,
                label: "Main".into(),
            },
            hidden: None,
        };
        let css = generate_css_variables(&sample).unwrap();

        assert!(css.contains("  --demo-max-width: 1200;\n"));
        assert!(css.contains("  --demo-font-family: Inter, sans-serif;\n"));
        assert!(css.contains("  --demo-is-sticky: true;\n"));
        assert!(css.contains("  --demo-label: Main;\n"));
        assert!(!css.contains("hidden"));
    }
}
