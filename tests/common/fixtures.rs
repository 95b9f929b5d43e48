use serde_json::{json, Value};

use form_continuity::TaggedCipher;

/// A small definition with a nested fieldset, mirroring what a host
/// form builder would hand over.
pub fn sample_definition() -> Value {
    json!({
        "#type": "form",
        "name": { "#type": "textfield", "#title": "Name" },
        "address": {
            "#type": "fieldset",
            "street": { "#type": "textfield" },
            "city": { "#type": "textfield" }
        }
    })
}

pub fn cipher() -> TaggedCipher {
    TaggedCipher::new(b"fixture-key")
}

/// Collect every `#id` in an emitted definition, depth-first.
pub fn collect_ids(value: &Value, ids: &mut Vec<String>) {
    if let Value::Object(map) = value {
        if let Some(id) = map.get("#id").and_then(Value::as_str) {
            ids.push(id.to_string());
        }
        for (key, child) in map {
            if !key.starts_with('#') {
                collect_ids(child, ids);
            }
        }
    }
}
