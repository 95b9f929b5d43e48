use serde_json::{Map, Value};

use crate::error::FormError;
use crate::form::hooks::AlterHooks;
use crate::form::request::{RequestState, TriggeringEvent, STASH_KEY};
use crate::stash::cipher::StashCipher;
use crate::stash::stash_model::FormStorage;
use crate::stash::token;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;
use crate::tree::builder::{build_tree, strip_ids, IdGenerator};
use crate::tree::element_model::{
    self, ElementRef, PROP_ID, PROP_TYPE, PROP_VALUE, PROP_WEIGHT,
};
use crate::tree::registry::{ElementRegistry, StoredElement};

/// Storage key holding the registry's original snapshots across requests.
const REGISTRY_STASH_KEY: &str = "element_registry";

/// Weight of the injected stash leaf; sorts last among siblings so it
/// never disturbs the positional logic of other nodes.
const STASH_WEIGHT: i64 = 10000;

/// Container for all the elements that comprise one form, for exactly
/// one request. Owns the registry, the element tree, and the storage
/// decoded from the prior stash token; runs the
/// decode → build → populate → dispatch → seal cycle to completion with
/// no suspension points and nothing shared with other requests.
pub struct Form {
    pub storage: FormStorage,
    pub registry: ElementRegistry,
    pub root: ElementRef,
    ids: IdGenerator,
    tracer: TraceLogger,
}

impl Form {
    /// Decode the prior stash out of the posted input and rebuild the
    /// element tree. Ids echoed back inside the definition are reused,
    /// which is what keeps identity stable across rebuilds.
    pub fn new(
        definition: &Value,
        request: &RequestState,
        cipher: &dyn StashCipher,
    ) -> Result<Self, FormError> {
        Self::build(
            definition,
            request,
            cipher,
            IdGenerator::new(),
            TraceLogger::disabled(),
        )
    }

    /// Same as `new`, logging each request phase to the given tracer.
    pub fn traced(
        definition: &Value,
        request: &RequestState,
        cipher: &dyn StashCipher,
        tracer: TraceLogger,
    ) -> Result<Self, FormError> {
        Self::build(definition, request, cipher, IdGenerator::new(), tracer)
    }

    /// Same as `new` with a caller-supplied id generator, for
    /// deterministic builds.
    pub fn with_ids(
        definition: &Value,
        request: &RequestState,
        cipher: &dyn StashCipher,
        ids: IdGenerator,
    ) -> Result<Self, FormError> {
        Self::build(definition, request, cipher, ids, TraceLogger::disabled())
    }

    fn build(
        definition: &Value,
        request: &RequestState,
        cipher: &dyn StashCipher,
        mut ids: IdGenerator,
        tracer: TraceLogger,
    ) -> Result<Self, FormError> {
        if !definition.is_object() {
            return Err(FormError::InvalidDefinition {
                detail: "definition root must be an object".to_string(),
            });
        }

        let storage = match token::decode(cipher, request.stash_token()) {
            Ok(storage) => {
                tracer.log(&TraceEvent::phase("stash_decoded").with_count(storage.len()));
                storage
            }
            Err(e) => {
                // Tampered or foreign token: normal adversary, not an error
                tracer.log(&TraceEvent::phase("stash_decode_failed").with_detail(&e));
                FormStorage::new()
            }
        };

        let mut registry = ElementRegistry::new();
        if let Some(snapshots) = storage.get(REGISTRY_STASH_KEY) {
            if let Ok(originals) =
                serde_json::from_value::<std::collections::HashMap<String, StoredElement>>(
                    snapshots.clone(),
                )
            {
                registry.restore_originals(originals);
            }
        }

        let root = build_tree(&mut registry, &mut ids, definition, None, "");
        tracer.log(&TraceEvent::phase("tree_built").with_count(registry.len()));

        Ok(Form {
            storage,
            registry,
            root,
            ids,
            tracer,
        })
    }

    pub fn find(&self, id: &str) -> Option<ElementRef> {
        element_model::find(&self.root, id)
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Clone the live subtree under `id` as a fully independent logical
    /// entity: fresh ids throughout, every node registered. The clone is
    /// detached; attach it with `add_child`. `None` for an unknown id.
    pub fn duplicate(&mut self, id: &str) -> Option<ElementRef> {
        let source = self.registry.get(id)?;
        let key = source.borrow().key.clone();
        let mut raw = element_model::to_value(&source);
        strip_ids(&mut raw);
        Some(build_tree(&mut self.registry, &mut self.ids, &raw, None, &key))
    }

    /// Clone from the registry's original snapshot instead: the subtree
    /// as it looked when first built, discarding every mutation since.
    /// Works even after the live node was removed.
    pub fn duplicate_original(&mut self, id: &str) -> Option<ElementRef> {
        let stored = self.registry.get_original(id)?.clone();
        let mut raw = stored.definition;
        strip_ids(&mut raw);
        Some(build_tree(
            &mut self.registry,
            &mut self.ids,
            &raw,
            None,
            &stored.key,
        ))
    }

    /// Orphan the node carrying `id` and drop it from the live
    /// registry. The original snapshot survives, so the node can still
    /// be duplicated from its first-seen state afterward.
    pub fn remove(&mut self, id: &str) -> Option<ElementRef> {
        let element = self.find(id)?;
        element_model::orphan(&element);
        self.registry.remove(id);
        Some(element)
    }

    /// Emit the annotated definition for the host to render.
    ///
    /// On a resubmission, submitted values are repopulated first and any
    /// pending triggering event is re-dispatched. Storage is serialized
    /// exactly once, here at the end of the request after every build
    /// step has run, so later mutations are captured in the token.
    pub fn render(
        &mut self,
        request: &RequestState,
        hooks: &AlterHooks,
        cipher: &dyn StashCipher,
    ) -> Value {
        let mut out = element_model::to_value(&self.root);

        if let Some(values) = &request.values {
            let tracker = crate::values::tracker::ValueTracker::new(values, &self.registry);
            crate::values::populator::populate(&mut out, &tracker);
            self.tracer.log(&TraceEvent::phase("populated"));

            if let Some(event) = &request.triggering {
                self.ajax_alter(&mut out, hooks, event);
            }
        }

        self.persist_registry();
        let sealed = token::save(cipher, &self.storage);
        self.tracer
            .log(&TraceEvent::phase("stash_sealed").with_count(self.storage.len()));

        if let Value::Object(map) = &mut out {
            let mut stash = Map::new();
            stash.insert(PROP_TYPE.to_string(), Value::String("hidden".to_string()));
            stash.insert(PROP_VALUE.to_string(), Value::String(sealed));
            stash.insert(PROP_WEIGHT.to_string(), Value::from(STASH_WEIGHT));
            map.insert(STASH_KEY.to_string(), Value::Object(stash));
        }

        out
    }

    /// Walk the emitted tree; where a node's id matches the event
    /// target, dispatch the per-type hook for it, then recurse into
    /// every child so nested triggering works. A stale target (node
    /// removed since the event was issued) is a silent no-op.
    fn ajax_alter(&self, form: &mut Value, hooks: &AlterHooks, event: &TriggeringEvent) {
        let node_id = form
            .get(PROP_ID)
            .and_then(Value::as_str)
            .map(str::to_owned);
        if let Some(node_id) = node_id {
            if node_id == event.target {
                if let Some(element) = self.find(&node_id) {
                    let element_type = element.borrow().element_type();
                    if let Some(element_type) = element_type {
                        let hook = AlterHooks::ajax_hook_name(&element_type);
                        hooks.alter(&hook, &element, form, event);
                        self.tracer.log(
                            &TraceEvent::phase("ajax_dispatched")
                                .with_target(&event.target)
                                .with_detail(&hook),
                        );
                    }
                }
            }
        }

        let child_keys: Vec<String> = match form {
            Value::Object(map) => map
                .keys()
                .filter(|k| !k.starts_with('#'))
                .cloned()
                .collect(),
            _ => return,
        };
        for key in child_keys {
            if let Some(child) = form.get_mut(&key) {
                if child.is_object() {
                    self.ajax_alter(child, hooks, event);
                }
            }
        }
    }

    /// Push the registry's original snapshots into storage so identity
    /// and pristine definitions survive the next round trip.
    fn persist_registry(&mut self) {
        if let Ok(snapshots) = serde_json::to_value(self.registry.originals()) {
            self.storage.set(REGISTRY_STASH_KEY, snapshots);
        }
    }
}
