//! `MemoryRuntime` — in-memory bridge over a pre-mirrored snapshot.
//!
//! Used by tests to drive the full checker without a live target, and by
//! callers that already hold a mirrored snapshot. Lookups are registered
//! per code string.

use crate::errors::ProbeError;
use crate::types::collections::FxHashMap;

use super::bridge::TargetBridge;
use super::candidate::{ExportValue, ModuleSnapshot};

/// Outcome registered for one lookup code string.
#[derive(Debug, Clone)]
enum LookupOutcome {
    Values(Vec<ExportValue>),
    Throws(String),
}

/// In-memory implementation of [`TargetBridge`].
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    snapshot: ModuleSnapshot,
    lookups: FxHashMap<String, LookupOutcome>,
}

impl MemoryRuntime {
    pub fn new(snapshot: ModuleSnapshot) -> Self {
        Self {
            snapshot,
            lookups: FxHashMap::default(),
        }
    }

    /// Register the values a lookup code string resolves to.
    pub fn register_lookup(&mut self, code: &str, values: Vec<ExportValue>) {
        self.lookups
            .insert(code.to_string(), LookupOutcome::Values(values));
    }

    /// Register a lookup that throws inside the target.
    pub fn register_throwing_lookup(&mut self, code: &str, message: &str) {
        self.lookups
            .insert(code.to_string(), LookupOutcome::Throws(message.to_string()));
    }
}

#[async_trait::async_trait]
impl TargetBridge for MemoryRuntime {
    async fn lookup(&self, code: &str) -> Result<Vec<ExportValue>, ProbeError> {
        tracing::debug!(code, "in-memory lookup");
        match self.lookups.get(code) {
            Some(LookupOutcome::Values(values)) => Ok(values.clone()),
            Some(LookupOutcome::Throws(message)) => Err(ProbeError::LookupThrew {
                message: message.clone(),
            }),
            None => Err(ProbeError::LookupFailed {
                message: format!("no lookup registered for {code:?}"),
            }),
        }
    }

    async fn snapshot(&self) -> Result<ModuleSnapshot, ProbeError> {
        Ok(self.snapshot.clone())
    }
}
