use serde_json::{Map, Value};
use thiserror::Error;

pub type PathResult<T> = std::result::Result<T, PathError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty segment in config path: {path:?}")]
    EmptySegment { path: String },
    #[error("cannot assign into non-object value at {segment:?} in {path:?}")]
    NotAnObject { path: String, segment: String },
    #[error("config root is not an object")]
    RootNotAnObject,
}

fn segments(path: &str) -> PathResult<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(PathError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

/// Looks up a dot-separated path. Missing keys and non-object intermediates yield `None`.
pub fn get_nested_value<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path).ok()?;
    parts
        .into_iter()
        .try_fold(tree, |current, key| current.as_object()?.get(key))
}

/// Assigns `value` at a dot-separated path, creating objects for missing or
/// `null` intermediates.
pub fn set_nested_value(tree: &mut Value, path: &str, value: Value) -> PathResult<()> {
    let parts = segments(path)?;
    let not_an_object = |segment: &str| PathError::NotAnObject {
        path: path.to_string(),
        segment: segment.to_string(),
    };

    let Some((&last, intermediates)) = parts.split_last() else {
        return Err(PathError::EmptySegment {
            path: path.to_string(),
        });
    };

    let mut current = tree;
    for &key in intermediates {
        let object = current.as_object_mut().ok_or_else(|| not_an_object(key))?;
        let slot = object
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    current
        .as_object_mut()
        .ok_or_else(|| not_an_object(last))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Merges the top-level keys of `partial` into `tree`. Nested objects are
/// replaced wholesale.
pub fn merge_shallow(tree: &mut Value, partial: Map<String, Value>) -> PathResult<()> {
    let object = tree.as_object_mut().ok_or(PathError::RootNotAnObject)?;
    object.extend(partial);
    Ok(())
}
