//! Probe failures — anything that goes wrong on the remote-execution
//! channel or while reading a mirrored candidate value.

use serde::{Deserialize, Serialize};

use super::error_code::{self, TypedriftErrorCode};

/// Errors raised by the target-runtime bridge. Carried inside mirrored
/// candidate entries (a value read that threw), so they serialize with
/// the rest of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ProbeError {
    /// The lookup ran but produced nothing usable.
    #[error("lookup failed: {message}")]
    LookupFailed { message: String },

    /// The lookup code itself threw inside the target runtime.
    #[error("lookup threw in target: {message}")]
    LookupThrew { message: String },

    /// Reading a property of a candidate threw (candidate poisoning).
    #[error("value of {key:?} is unreadable: {message}")]
    ValueUnreadable { key: String, message: String },

    /// The shared remote-execution channel is gone.
    #[error("remote-execution channel closed")]
    ChannelClosed,

    /// The loaded-modules snapshot could not be produced.
    #[error("module snapshot unavailable: {message}")]
    SnapshotUnavailable { message: String },
}

impl TypedriftErrorCode for ProbeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LookupFailed { .. } => error_code::PROBE_LOOKUP_FAILED,
            Self::LookupThrew { .. } => error_code::PROBE_LOOKUP_THREW,
            Self::ValueUnreadable { .. } => error_code::PROBE_VALUE_UNREADABLE,
            Self::ChannelClosed => error_code::PROBE_CHANNEL_CLOSED,
            Self::SnapshotUnavailable { .. } => error_code::PROBE_SNAPSHOT_UNAVAILABLE,
        }
    }
}
