//! Drift results — the computed difference between a baseline and a
//! candidate member bag. Pure, immutable outputs, created fresh per
//! declaration-check run.

use serde::{Deserialize, Serialize};

use super::member_bag::{ClassBag, EnumBag, MemberCategory};

/// Score assigned to a disqualified (poisoned) candidate — the maximum
/// representable count, so it can never win a lowest-score search.
pub const POISONED_SCORE: usize = usize::MAX;

/// Drift between one baseline class bag and one (merged) candidate bag.
///
/// `additions`/`removals` reuse [`ClassBag`]: the sets hold the drifted
/// member names per category, and `has_param_constructor` on each side
/// records a constructor-shape mismatch in that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDrift {
    /// Members present in the candidate but not the reconciled baseline.
    pub additions: ClassBag,
    /// Members present in the reconciled baseline but not the candidate.
    pub removals: ClassBag,
    pub unchanged_count: usize,
    pub changed_count: usize,
}

impl ClassDrift {
    /// Whether the constructor-shape flag differs between baseline and
    /// candidate (in either direction). Used by the class acceptance gate
    /// as a corroborating structural signal.
    pub fn constructor_shape_differs(&self) -> bool {
        self.additions.has_param_constructor || self.removals.has_param_constructor
    }
}

/// Drift between one baseline enum map and one candidate object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDrift {
    /// Entries present in the candidate but not the reconciled baseline.
    pub additions: EnumBag,
    /// Baseline entries the candidate no longer carries.
    pub removals: EnumBag,
    pub unchanged_count: usize,
    pub changed_count: usize,
    /// Set when reading a candidate value threw: `changed_count` is forced
    /// to [`POISONED_SCORE`] and enumeration stopped. The partial
    /// `unchanged_count` accumulated before the poison is retained.
    pub poisoned: bool,
}

/// Per-declaration drift, unified at the report boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DriftChanges {
    Class(ClassDrift),
    Enum(EnumDrift),
}

impl DriftChanges {
    pub fn changed_count(&self) -> usize {
        match self {
            Self::Class(d) => d.changed_count,
            Self::Enum(d) => d.changed_count,
        }
    }

    pub fn unchanged_count(&self) -> usize {
        match self {
            Self::Class(d) => d.unchanged_count,
            Self::Enum(d) => d.unchanged_count,
        }
    }

    /// True when the check found no drift at all.
    pub fn is_clean(&self) -> bool {
        self.changed_count() == 0
    }
}

impl std::fmt::Display for DriftChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class(d) => {
                write!(
                    f,
                    "class drift: {} changed, {} unchanged",
                    d.changed_count, d.unchanged_count
                )?;
                for cat in MemberCategory::all() {
                    for name in d.additions.category(*cat) {
                        write!(f, "\n  + {cat}.{name}")?;
                    }
                    for name in d.removals.category(*cat) {
                        write!(f, "\n  - {cat}.{name}")?;
                    }
                }
                if d.additions.has_param_constructor {
                    write!(f, "\n  + constructor(…)")?;
                }
                if d.removals.has_param_constructor {
                    write!(f, "\n  - constructor(…)")?;
                }
                Ok(())
            }
            Self::Enum(d) => {
                if d.poisoned {
                    write!(f, "enum drift: candidate poisoned")?;
                } else {
                    write!(
                        f,
                        "enum drift: {} changed, {} unchanged",
                        d.changed_count, d.unchanged_count
                    )?;
                }
                for (key, value) in &d.additions {
                    write!(f, "\n  + {key} = {value}")?;
                }
                for (key, value) in &d.removals {
                    write!(f, "\n  - {key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}
