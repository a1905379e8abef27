//! Diagnostics sink for the non-fatal problems found while resolving a header.
//!
//! Nothing here aborts parsing: every warning is reported through a [`Logger`] and
//! processing carries on.
use std::sync::{Mutex, PoisonError};

use crate::Location;

/// Receiver for the warnings emitted while processing a document.
pub trait Logger: std::fmt::Debug + Send + Sync {
    fn warn(&self, location: &Location, message: &str);
}

/// Forwards warnings to `tracing`. This is the logger documents get by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, location: &Location, message: &str) {
        tracing::warn!(source = %location.source, line = location.line, "{location}: {message}");
    }
}

/// Keeps every warning in memory, formatted as `<source>: line <N>: <message>`.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: Mutex<Vec<String>>,
}

impl MemoryLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Logger for MemoryLogger {
    fn warn(&self, location: &Location, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{location}: {message}"));
    }
}
