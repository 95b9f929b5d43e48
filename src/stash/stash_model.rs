use serde_json::{Map, Value};

/// Per-request key/value storage for data that cannot be represented as
/// form output: counters, cached computed objects, element snapshots.
///
/// Initialized empty on the first-ever render, decoded from the stash
/// token once at construction, sealed back into a token once at render
/// time with whatever mutations the request made in between.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormStorage {
    entries: Map<String, Value>,
}

impl FormStorage {
    pub fn new() -> Self {
        FormStorage {
            entries: Map::new(),
        }
    }

    pub fn from_entries(entries: Map<String, Value>) -> Self {
        FormStorage { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }
}
