use serde_json::Value;

use crate::tree::element_model::parents_path;
use crate::tree::registry::ElementRegistry;
use crate::values::nested;

/// Connects submitted values with live elements. Holds the structure
/// the browser actually submitted against, which may be older than the
/// rebuilt tree, so every lookup is best-effort.
pub struct ValueTracker<'a> {
    values: &'a Value,
    registry: &'a ElementRegistry,
}

impl<'a> ValueTracker<'a> {
    pub fn new(values: &'a Value, registry: &'a ElementRegistry) -> Self {
        ValueTracker { values, registry }
    }

    /// Submitted value for the element carrying `id`, located by the
    /// element's path from the tree root. Composites (objects, arrays)
    /// yield `None`: those are handled by recursing into children, not
    /// as one leaf's value. Unresolvable paths yield `None` as well,
    /// since the tree may have gained or lost nodes since submission.
    pub fn value_for(&self, id: &str) -> Option<Value> {
        let element = self.registry.get(id)?;
        let path = parents_path(&element);
        if path.is_empty() {
            return None;
        }
        let value = nested::value_at(self.values, &path)?;
        if value.is_object() || value.is_array() {
            return None;
        }
        Some(value.clone())
    }
}
