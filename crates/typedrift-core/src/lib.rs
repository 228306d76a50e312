//! # typedrift-core
//!
//! Foundation crate for the typedrift declaration checker.
//! Defines the member-bag and drift types, the mirrored runtime value
//! model, the target-bridge trait, declaration config, errors, and
//! tracing. The analysis crate depends on this; this depends on nothing
//! else in the workspace.

pub mod config;
pub mod errors;
pub mod runtime;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{CheckConfig, DeclarationConfig, KeyMapper};
pub use errors::error_code::TypedriftErrorCode;
pub use runtime::bridge::TargetBridge;
pub use runtime::candidate::{CandidateId, ClassCandidate, EnumCandidate, ExportValue, ModuleSnapshot};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::drift::{ClassDrift, DriftChanges, EnumDrift};
pub use types::member_bag::{ClassBag, EnumBag, EnumValue, MemberCategory};
pub use types::DeclarationKind;
