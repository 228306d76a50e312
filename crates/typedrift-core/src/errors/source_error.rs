//! File-level fatal errors — unreadable or unparseable declaration
//! sources and configs. These abort the entire file's declaration set.

use std::path::PathBuf;

use super::error_code::{self, TypedriftErrorCode};

/// Errors that short-circuit a whole declaration file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("cannot parse {path}: {message}")]
    Unparseable { path: PathBuf, message: String },

    #[error("grammar unavailable: {message}")]
    GrammarUnavailable { message: String },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl TypedriftErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SOURCE_IO,
            Self::Unparseable { .. } => error_code::SOURCE_UNPARSEABLE,
            Self::GrammarUnavailable { .. } => error_code::SOURCE_GRAMMAR_UNAVAILABLE,
            Self::Config { .. } => error_code::SOURCE_CONFIG,
        }
    }
}
