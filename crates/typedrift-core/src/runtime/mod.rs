//! Mirrored runtime value model and the bridge to the live target.
//!
//! The checker never touches live objects. The bridge mirrors candidates
//! into the plain data of this module: property descriptors, constructor
//! source text, and enum entries whose value reads may have failed.

pub mod bridge;
pub mod candidate;
pub mod memory;
pub mod value;

pub use bridge::TargetBridge;
pub use candidate::{
    CandidateId, ClassCandidate, EnumCandidate, ExportValue, Module, ModuleExport, ModuleSnapshot,
};
pub use memory::MemoryRuntime;
pub use value::{PropertyDescriptor, Slot};
