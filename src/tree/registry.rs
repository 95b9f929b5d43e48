use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tree::element_model::{self, ElementRef};

/// Serializable snapshot of an element subtree as it looked when its id
/// was first registered. Snapshots survive the round trip through the
/// state stash, so duplication-from-original works on later requests
/// even after the live node was mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredElement {
    /// Local key the node had under its parent
    pub key: String,

    /// Emitted subtree, ids included
    pub definition: Value,
}

/// Per-form registry of every created or cloned element. One registry
/// per Form instance, never shared across concurrent forms or users.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    current: HashMap<String, ElementRef>,
    original: HashMap<String, StoredElement>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        ElementRegistry {
            current: HashMap::new(),
            original: HashMap::new(),
        }
    }

    /// Insert a live element. The original snapshot is captured only the
    /// first time an id is seen and is immutable afterward.
    ///
    /// Panics if the id is already live: two nodes sharing one id means
    /// the identity scheme itself is broken, which must be loud.
    pub fn register(&mut self, element: &ElementRef) {
        let id = element.borrow().id.clone();
        if self.current.contains_key(&id) {
            panic!("element id collision: two live elements share id {}", id);
        }
        if !self.original.contains_key(&id) {
            let key = element.borrow().key.clone();
            self.original.insert(
                id.clone(),
                StoredElement {
                    key,
                    definition: element_model::to_value(element),
                },
            );
        }
        self.current.insert(id, element.clone());
    }

    pub fn get(&self, id: &str) -> Option<ElementRef> {
        self.current.get(id).cloned()
    }

    pub fn get_original(&self, id: &str) -> Option<&StoredElement> {
        self.original.get(id)
    }

    /// Drop an element from the live set. Originals are never removed,
    /// so duplication-from-original stays possible after removal.
    pub fn remove(&mut self, id: &str) -> Option<ElementRef> {
        self.current.remove(id)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.current.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn originals(&self) -> &HashMap<String, StoredElement> {
        &self.original
    }

    /// Seed original snapshots decoded from a prior request's stash.
    /// Snapshots already present win; restored ones never overwrite.
    pub fn restore_originals(&mut self, snapshots: HashMap<String, StoredElement>) {
        for (id, stored) in snapshots {
            self.original.entry(id).or_insert(stored);
        }
    }
}
