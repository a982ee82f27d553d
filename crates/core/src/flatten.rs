//! Flattening of nested JSON objects into dotted-key maps.

use serde_json::{Map, Value};

/// Default key delimiter.
pub const DEFAULT_DELIMITER: &str = ".";

/// Flattens `object` using [`DEFAULT_DELIMITER`].
pub fn flatten(object: &Map<String, Value>) -> Map<String, Value> {
    flatten_json(object, DEFAULT_DELIMITER)
}

/// Collapses nested objects into a single level.
///
/// Keys are the delimiter-joined path from the root to each leaf. Arrays
/// and scalars are leaves; an empty nested object contributes no keys.
pub fn flatten_json(object: &Map<String, Value>, delimiter: &str) -> Map<String, Value> {
    let mut flattened = Map::new();
    flatten_into(&mut flattened, None, object, delimiter);
    flattened
}

fn flatten_into(
    out: &mut Map<String, Value>,
    prefix: Option<&str>,
    object: &Map<String, Value>,
    delimiter: &str,
) {
    for (key, value) in object {
        let path = match prefix {
            Some(p) => format!("{p}{delimiter}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(out, Some(&path), nested, delimiter),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Flattens `value` when it is an object; `None` for any other JSON type.
pub fn flatten_value(value: &Value) -> Option<Map<String, Value>> {
    value.as_object().map(flatten)
}
