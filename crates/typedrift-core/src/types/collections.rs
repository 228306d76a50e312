//! Collection aliases used across the workspace.
//!
//! Hash maps/sets are FxHash-backed (identity sets, lookup tables). The
//! member bags themselves use `BTreeSet`/`BTreeMap` so every derived
//! artifact is deterministic regardless of insertion order.

pub use rustc_hash::{FxHashMap, FxHashSet};
