//! Candidate member-bag extraction from mirrored runtime values.

pub mod extract;
pub mod fields;

pub use extract::{class_bag_from_candidate, merged_class_bag};
pub use fields::{default_discovery, DefineCallScan, FieldDiscovery, ThisAssignmentScan};
