use serde_json::Value;

/// Input key and output child key under which the stash token rides.
pub const STASH_KEY: &str = "form_state_stash";

/// Everything the host hands over for one submission. The core holds no
/// server-side memory between requests; this container plus the stash
/// token is the entire cross-request channel.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    /// Raw user input exactly as posted, before any processing. The
    /// prior stash token, if any, rides here under `STASH_KEY`.
    pub input: Value,

    /// Processed submitted values mirroring the prior output shape.
    /// `None` on a first render, `Some` on a resubmission.
    pub values: Option<Value>,

    /// Client-originated partial-update event, if one fired.
    pub triggering: Option<TriggeringEvent>,
}

impl RequestState {
    /// First-ever render: no input, no values, no event.
    pub fn first_render() -> Self {
        RequestState::default()
    }

    pub fn resubmission(input: Value, values: Value) -> Self {
        RequestState {
            input,
            values: Some(values),
            triggering: None,
        }
    }

    pub fn with_triggering(mut self, event: TriggeringEvent) -> Self {
        self.triggering = Some(event);
        self
    }

    /// Prior stash token carried in the posted input, if present.
    pub fn stash_token(&self) -> Option<&str> {
        self.input.get(STASH_KEY).and_then(Value::as_str)
    }
}

/// A client-originated event referencing a specific node id, requiring
/// a targeted per-type extension-point dispatch. The target may be
/// stale: the node can have been removed since the event was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeringEvent {
    /// Id of the node the client says triggered the update
    pub target: String,

    /// Opaque event metadata passed through to hooks
    pub params: Value,
}

impl TriggeringEvent {
    pub fn new(target: impl Into<String>) -> Self {
        TriggeringEvent {
            target: target.into(),
            params: Value::Null,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}
