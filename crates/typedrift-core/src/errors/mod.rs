//! Error types for the typedrift workspace.

pub mod check_error;
pub mod error_code;
pub mod probe_error;
pub mod source_error;

pub use check_error::CheckError;
pub use probe_error::ProbeError;
pub use source_error::SourceError;
