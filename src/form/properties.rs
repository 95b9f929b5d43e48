use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

pub type PropertyConstructor = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Property names mapped to the constructors that expand their raw
/// values. Populated once per process; read-only afterward, so
/// concurrent requests can resolve without locking.
#[derive(Default)]
pub struct PropertyTypes {
    constructors: HashMap<String, PropertyConstructor>,
}

impl PropertyTypes {
    pub fn new() -> Self {
        PropertyTypes {
            constructors: HashMap::new(),
        }
    }

    pub fn define(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    pub fn resolve(&self, name: &str) -> Option<&PropertyConstructor> {
        self.constructors.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

static REGISTERED: OnceLock<PropertyTypes> = OnceLock::new();

/// One-time process-wide registration. Returns false if a registry was
/// already installed; the first installation wins.
pub fn register_property_types(types: PropertyTypes) -> bool {
    REGISTERED.set(types).is_ok()
}

pub fn resolve(name: &str) -> Option<&'static PropertyConstructor> {
    REGISTERED.get().and_then(|types| types.resolve(name))
}

pub fn is_registered_property(name: &str) -> bool {
    resolve(name).is_some()
}

/// Expand a raw property value through its registered constructor.
/// Unregistered names pass the value through unchanged.
pub fn expand(name: &str, value: &Value) -> Value {
    match resolve(name) {
        Some(constructor) => constructor(value),
        None => value.clone(),
    }
}
