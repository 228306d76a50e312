//! Exhaustive best-match search over a module snapshot, plus the store
//! fast path.

pub mod class_search;
pub mod enum_search;
pub mod store;

pub use class_search::{auto_find_class, ClassSearchHit};
pub use enum_search::{auto_find_enum, EnumSearchHit};
pub use store::{auto_find_store, is_store_declaration, StoreSearchHit};

/// Why a search produced no accepted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMiss {
    /// No export in the snapshot was structurally usable.
    NoCandidates,
    /// A best match existed but failed the acceptance gate.
    GateRejected,
}
