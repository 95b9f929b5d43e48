use serde_json::Value;

/// Index a nested value structure by a path of local keys. String keys
/// index objects; keys that parse as integers index arrays, so the same
/// path resolves whether a level was submitted as a mapping or a
/// sequence. Any miss (absent key, index out of range, scalar in the
/// middle) yields `None`.
pub fn value_at<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
