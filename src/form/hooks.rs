use std::collections::HashMap;

use serde_json::Value;

use crate::form::request::TriggeringEvent;
use crate::tree::element_model::ElementRef;

pub type AlterFn = Box<dyn Fn(&ElementRef, &mut Value, &TriggeringEvent) + Send + Sync>;

/// Externally-registered per-type event hooks. A hook receives the live
/// element that matched the trigger, the rendered subtree it sits in,
/// and the event. Unregistered hook names dispatch to nothing.
#[derive(Default)]
pub struct AlterHooks {
    hooks: HashMap<String, Vec<AlterFn>>,
}

impl AlterHooks {
    pub fn new() -> Self {
        AlterHooks {
            hooks: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&ElementRef, &mut Value, &TriggeringEvent) + Send + Sync + 'static,
    ) {
        self.hooks
            .entry(name.into())
            .or_default()
            .push(Box::new(hook));
    }

    pub fn alter(
        &self,
        name: &str,
        element: &ElementRef,
        form: &mut Value,
        event: &TriggeringEvent,
    ) {
        if let Some(registered) = self.hooks.get(name) {
            for hook in registered {
                hook(element, form, event);
            }
        }
    }

    /// Hook name dispatched when an element of `element_type` triggers
    /// a partial update.
    pub fn ajax_hook_name(element_type: &str) -> String {
        format!("form_element_{}_ajax", element_type)
    }
}
