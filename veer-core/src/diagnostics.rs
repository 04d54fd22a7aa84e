//! Injectable diagnostics reporting.
//!
//! Precondition violations and recoverable failures are *reported*, never
//! thrown: components hand a short message to the sink they were constructed
//! with and carry on. The default sink discards everything.

use std::cell::RefCell;

use crate::EntityId;

/// Receiver for informational diagnostics.
///
/// Messages are tagged with the originating component and the affected entity
/// and must never participate in control flow.
pub trait DiagnosticsSink {
    fn report(&self, component: &str, message: &str, entity: &EntityId);
}

/// Discards every report. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn report(&self, _component: &str, _message: &str, _entity: &EntityId) {}
}

/// Routes reports to `tracing::debug!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, component: &str, message: &str, entity: &EntityId) {
        tracing::debug!(target: "veer", component, entity = %entity, "{message}");
    }
}

/// Collects formatted reports in memory.
///
/// Useful for tests and tooling that assert on diagnostics. Lines are
/// formatted as `[Component]: Message (entity-id)`.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&self, component: &str, message: &str, entity: &EntityId) {
        self.lines
            .borrow_mut()
            .push(format!("[{component}]: {message} ({entity})"));
    }
}
