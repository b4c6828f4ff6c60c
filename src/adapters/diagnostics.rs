use crate::domain::ports::{Diagnostics, FailureRecord};
use std::sync::{Arc, Mutex};

/// Default diagnostics channel: the `tracing` subscriber installed by the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn request_failed(&self, record: &FailureRecord) {
        tracing::error!(
            endpoint = %record.endpoint,
            status = ?record.status,
            body = record.body.as_deref().unwrap_or(""),
            "❌ {}",
            record.message
        );
    }

    fn warn(&self, endpoint: &str, message: &str) {
        tracing::warn!(endpoint = %endpoint, "⚠️ {}", message);
    }
}

/// Keeps every diagnostic in memory, for callers that want to show them
/// next to the data instead of (or as well as) logging them.
#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnostics {
    failures: Arc<Mutex<Vec<FailureRecord>>>,
    warnings: Arc<Mutex<Vec<String>>>,
}

impl CollectingDiagnostics {
    pub fn failures(&self) -> Vec<FailureRecord> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn request_failed(&self, record: &FailureRecord) {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }

    fn warn(&self, endpoint: &str, message: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(format!("{}: {}", endpoint, message));
    }
}
