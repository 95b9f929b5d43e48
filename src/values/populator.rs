use serde_json::Value;

use crate::tree::element_model::{PROP_DEFAULT_VALUE, PROP_ID};
use crate::values::tracker::ValueTracker;

/// Populate an emitted form's `#default_value` properties from
/// submitted input. Visits every child exactly once; a node the tracker
/// cannot resolve is left untouched, so elements introduced since the
/// last round trip are never blanked out.
pub fn populate(form: &mut Value, tracker: &ValueTracker<'_>) {
    let Value::Object(map) = form else {
        return;
    };
    for (key, child) in map.iter_mut() {
        if key.starts_with('#') || !child.is_object() {
            continue;
        }
        let submitted = child
            .get(PROP_ID)
            .and_then(Value::as_str)
            .and_then(|id| tracker.value_for(id));
        if let Some(value) = submitted {
            if let Value::Object(child_map) = child {
                child_map.insert(PROP_DEFAULT_VALUE.to_string(), value);
            }
        }
        populate(child, tracker);
    }
}
