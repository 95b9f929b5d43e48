use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the request trace: which phase of the
/// decode → build → populate → dispatch → seal cycle ran, and what it
/// touched.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub phase: String,

    pub detail: Option<String>,
    pub element_count: Option<usize>,
    pub target: Option<String>,
}

impl TraceEvent {
    pub fn phase(phase: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_millis(),
            phase: phase.to_string(),
            detail: None,
            element_count: None,
            target: None,
        }
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.element_count = Some(count);
        self
    }

    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }
}
