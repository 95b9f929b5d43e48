use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};

/// Identity key echoed back by the client on every node.
pub const PROP_ID: &str = "#id";

/// Element type name, used to derive per-type hook names.
pub const PROP_TYPE: &str = "#type";

/// Repopulation target for submitted values.
pub const PROP_DEFAULT_VALUE: &str = "#default_value";

/// Render priority among siblings.
pub const PROP_WEIGHT: &str = "#weight";

/// Literal value carried by hidden elements.
pub const PROP_VALUE: &str = "#value";

pub type ElementRef = Rc<RefCell<Element>>;

/// One node of the form definition. The parent link is a relation only,
/// never ownership: a parent owns its children through the ordered
/// children list, and nothing owns its parent.
#[derive(Debug)]
pub struct Element {
    /// Unique within every tree reachable from one root
    pub id: String,

    /// Local key under the parent; empty for the root
    pub key: String,

    pub(crate) parent: Weak<RefCell<Element>>,
    pub(crate) children: Vec<(String, ElementRef)>,
    properties: Map<String, Value>,
}

impl Element {
    pub fn new(id: String, key: String, properties: Map<String, Value>) -> Self {
        Element {
            id,
            key,
            parent: Weak::new(),
            children: Vec::new(),
            properties,
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    /// The `#type` name, if the node declares one.
    pub fn element_type(&self) -> Option<String> {
        self.properties
            .get(PROP_TYPE)
            .and_then(Value::as_str)
            .map(String::from)
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.upgrade()
    }

    pub fn children(&self) -> &[(String, ElementRef)] {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<ElementRef> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c.clone())
    }
}

/// Attach a child under a parent, replacing any existing child at the key.
pub fn add_child(parent: &ElementRef, key: &str, child: &ElementRef) {
    child.borrow_mut().parent = Rc::downgrade(parent);
    child.borrow_mut().key = key.to_string();
    let mut parent_ref = parent.borrow_mut();
    parent_ref.children.retain(|(k, _)| k != key);
    parent_ref.children.push((key.to_string(), child.clone()));
}

/// Depth-first search from `root` for the node carrying `id`. Ids are
/// unique, so at most one node matches.
pub fn find(root: &ElementRef, id: &str) -> Option<ElementRef> {
    if root.borrow().id == id {
        return Some(root.clone());
    }
    let children: Vec<ElementRef> = root
        .borrow()
        .children
        .iter()
        .map(|(_, c)| c.clone())
        .collect();
    for child in &children {
        if let Some(found) = find(child, id) {
            return Some(found);
        }
    }
    None
}

/// Detach a node from its parent. The node keeps existing as an object
/// but is no longer reachable from the root.
pub fn orphan(element: &ElementRef) {
    let parent = element.borrow().parent.upgrade();
    if let Some(parent) = parent {
        parent
            .borrow_mut()
            .children
            .retain(|(_, c)| !Rc::ptr_eq(c, element));
    }
    element.borrow_mut().parent = Weak::new();
}

/// Local keys from the root down to this node, computed by walking the
/// parent links. The root's own (empty) key is not part of the path.
pub fn parents_path(element: &ElementRef) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = element.clone();
    loop {
        let (key, parent) = {
            let node = current.borrow();
            (node.key.clone(), node.parent.upgrade())
        };
        match parent {
            Some(parent) => {
                path.push(key);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Rebuild the raw nested definition from an element subtree. Each node
/// is annotated with `#id` so the host can echo identity back on the
/// next submission. Children are emitted after properties, in order.
pub fn to_value(element: &ElementRef) -> Value {
    let node = element.borrow();
    let mut out = Map::new();
    out.insert(PROP_ID.to_string(), Value::String(node.id.clone()));
    for (name, value) in &node.properties {
        if name != PROP_ID {
            out.insert(name.clone(), value.clone());
        }
    }
    for (key, child) in &node.children {
        out.insert(key.clone(), to_value(child));
    }
    Value::Object(out)
}
