//! Mirrored candidates and the loaded-modules snapshot.

use serde::{Deserialize, Serialize};

use crate::errors::ProbeError;
use crate::types::member_bag::EnumValue;

use super::value::PropertyDescriptor;

/// Reference identity of a value inside the target runtime, assigned by
/// the bridge. Two mirrors of the same live constructor share an id; the
/// exhaustive search keys its dedup set on this, never on value equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u64);

/// A mirrored constructor: everything the class matcher can observe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCandidate {
    pub id: CandidateId,
    /// Own property descriptors of the constructor (statics).
    pub statics: Vec<PropertyDescriptor>,
    /// Property descriptors of the shared behavior template (instance
    /// methods and accessors; fields never appear here).
    pub template: Vec<PropertyDescriptor>,
    /// The constructor's exposed source representation. Scanned for the
    /// parameter-constructor signal and for field-initialization idioms.
    pub ctor_source: String,
    /// Display name, when the target assigns one.
    pub display_name: Option<String>,
    /// Persistence key, when the candidate participates in persistence.
    pub persist_key: Option<String>,
}

/// A mirrored plain object viewed as an enum candidate. A value read that
/// threw in the target is mirrored as an `Err` entry and poisons scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumCandidate {
    pub id: CandidateId,
    pub entries: Vec<(String, Result<EnumValue, ProbeError>)>,
}

impl EnumCandidate {
    /// Convenience constructor for fully-readable candidates.
    pub fn from_entries(
        id: CandidateId,
        entries: impl IntoIterator<Item = (String, EnumValue)>,
    ) -> Self {
        Self {
            id,
            entries: entries.into_iter().map(|(k, v)| (k, Ok(v))).collect(),
        }
    }
}

/// One mirrored module export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExportValue {
    /// A constructor — directly callable with a behavior template.
    Class(ClassCandidate),
    /// A non-null, non-array object. `constructor` is present when the
    /// object exposes one (instances do; records usually mirror their
    /// trivial constructor as absent).
    Object {
        object: EnumCandidate,
        constructor: Option<ClassCandidate>,
    },
    /// Anything structurally unusable: null, arrays, primitives.
    Opaque,
}

impl ExportValue {
    /// The constructor this export contributes to a class search, if any.
    pub fn as_constructor(&self) -> Option<&ClassCandidate> {
        match self {
            Self::Class(c) => Some(c),
            Self::Object {
                constructor: Some(c),
                ..
            } => Some(c),
            _ => None,
        }
    }

    /// The enum-candidate view of this export, if any.
    pub fn as_object(&self) -> Option<&EnumCandidate> {
        match self {
            Self::Object { object, .. } => Some(object),
            _ => None,
        }
    }
}

/// A named export of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleExport {
    pub name: String,
    pub value: ExportValue,
}

/// One loaded module and its exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: u32,
    pub exports: Vec<ModuleExport>,
}

/// Read-only snapshot of every currently loaded module's exports — the
/// injected enumeration capability the exhaustive search runs over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub modules: Vec<Module>,
}

impl ModuleSnapshot {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// Iterate every export of every module, in snapshot order.
    pub fn exports(&self) -> impl Iterator<Item = (&Module, &ModuleExport)> {
        self.modules
            .iter()
            .flat_map(|m| m.exports.iter().map(move |e| (m, e)))
    }

    pub fn export_count(&self) -> usize {
        self.modules.iter().map(|m| m.exports.len()).sum()
    }
}
