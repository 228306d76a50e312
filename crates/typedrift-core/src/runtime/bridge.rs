//! The bridge to the live target runtime.
//!
//! All probes are asynchronous round-trips over one shared remote-execution
//! channel. The checker holds exactly one bridge; every outstanding probe
//! contends for it. There is no timeout — a hung probe hangs its
//! declaration's report.

use async_trait::async_trait;

use crate::errors::ProbeError;

use super::candidate::{ExportValue, ModuleSnapshot};

/// Async interface to the target runtime.
///
/// Implementations execute author-supplied lookup code and mirror the
/// results; the checker only ever sees plain mirrored data.
#[async_trait]
pub trait TargetBridge: Send + Sync {
    /// Execute a lookup procedure inside the target. Returns zero, one, or
    /// many mirrored candidates; an `Err` models the lookup throwing or
    /// the channel failing.
    async fn lookup(&self, code: &str) -> Result<Vec<ExportValue>, ProbeError>;

    /// Mirror the exports of every currently loaded module.
    async fn snapshot(&self) -> Result<ModuleSnapshot, ProbeError>;
}
