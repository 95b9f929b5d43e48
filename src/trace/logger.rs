use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use crate::trace::trace::TraceEvent;

/// Appends request-cycle events as JSON lines. A disabled logger (the
/// default for `Form::new`) swallows everything; one that failed to
/// open degrades to disabled with a warning.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Mutex::new(file)),
            },
            Err(e) => {
                eprintln!("Warning: could not open trace file '{}': {}", path, e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return; // tracing disabled
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        match sink.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    eprintln!("Warning: failed to write trace event: {}", e);
                }
            }
            Err(e) => eprintln!("Warning: trace logger lock poisoned: {}", e),
        }
    }
}
