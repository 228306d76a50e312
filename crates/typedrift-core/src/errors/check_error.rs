//! Declaration-level check errors — fatal for one declaration, never for
//! the file or the run.

use super::error_code::{self, TypedriftErrorCode};

/// Errors that fail a single declaration's check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// Every lookup stage failed or was absent; nothing to score.
    #[error("{identifier}: no candidate found in target")]
    NotFound { identifier: String },

    /// A search produced a best match, but it failed the acceptance gate.
    #[error("{identifier}: best match rejected (insufficient structural evidence)")]
    NoAcceptableCandidate { identifier: String },
}

impl TypedriftErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::CHECK_NOT_FOUND,
            Self::NoAcceptableCandidate { .. } => error_code::CHECK_NO_ACCEPTABLE_CANDIDATE,
        }
    }
}
