use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

use crate::form::properties;
use crate::tree::element_model::{Element, ElementRef, PROP_ID};
use crate::tree::registry::ElementRegistry;

/// Generates element ids for one tree: SHA-1 over a per-form nonce and
/// a serial counter. Ids are opaque hex strings, never reused for a
/// different logical node within one tree lifetime.
#[derive(Debug)]
pub struct IdGenerator {
    nonce: String,
    serial: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        IdGenerator {
            nonce: format!("{:x}", nanos),
            serial: 0,
        }
    }

    /// Deterministic generator for tests and replayable builds.
    pub fn seeded(seed: u64) -> Self {
        IdGenerator {
            nonce: format!("seed-{}", seed),
            serial: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.serial += 1;
        let mut hasher = Sha1::new();
        hasher.update(self.nonce.as_bytes());
        hasher.update(b":");
        hasher.update(self.serial.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}

/// Walk a raw nested definition and produce an element subtree.
///
/// Keys starting with `#` become properties (expanded through the
/// process-wide property-type registry); other keys holding objects
/// become children in insertion order; remaining entries are carried as
/// opaque properties so emit stays lossless. A node that already
/// carries `#id` (echoed back by the client) keeps it; otherwise a
/// fresh id is generated. Every node is registered, parents after their
/// children so the original snapshot covers the whole subtree.
pub fn build_tree(
    registry: &mut ElementRegistry,
    ids: &mut IdGenerator,
    raw: &Value,
    parent: Option<&ElementRef>,
    key: &str,
) -> ElementRef {
    let empty = Map::new();
    let definition = raw.as_object().unwrap_or(&empty);

    let id = match definition.get(PROP_ID).and_then(Value::as_str) {
        Some(echoed) => echoed.to_string(),
        None => ids.next_id(),
    };

    let mut props = Map::new();
    for (name, value) in definition {
        if name == PROP_ID {
            continue;
        }
        if name.starts_with('#') {
            props.insert(name.clone(), properties::expand(name, value));
        } else if !value.is_object() {
            props.insert(name.clone(), value.clone());
        }
    }

    let element: ElementRef = Rc::new(RefCell::new(Element::new(id, key.to_string(), props)));
    if let Some(parent) = parent {
        element.borrow_mut().parent = Rc::downgrade(parent);
    }

    for (child_key, child_raw) in definition {
        if child_key.starts_with('#') || !child_raw.is_object() {
            continue;
        }
        let child = build_tree(registry, ids, child_raw, Some(&element), child_key);
        element.borrow_mut().children.push((child_key.clone(), child));
    }

    registry.register(&element);
    element
}

/// Drop `#id` from every node of a raw subtree, so a rebuild assigns
/// fresh identity throughout.
pub fn strip_ids(value: &mut Value) {
    if let Value::Object(map) = value {
        map.remove(PROP_ID);
        for (_, child) in map.iter_mut() {
            strip_ids(child);
        }
    }
}
