//! Property descriptors of mirrored candidates.

use serde::{Deserialize, Serialize};

/// What kind of slot a property occupies on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// A plain data property — a method or a field; the two are
    /// indistinguishable at descriptor granularity.
    Data,
    Getter,
    Setter,
    /// A paired accessor (both get and set defined).
    Accessor,
}

/// One own-property descriptor of a mirrored candidate.
///
/// The bridge never mirrors the universal metadata keys (`length`, `name`,
/// `prototype`, `arguments`, `caller` on constructors; `constructor` on
/// behavior templates) — they exist on everything and carry no signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub slot: Slot,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, slot: Slot) -> Self {
        Self {
            name: name.into(),
            slot,
        }
    }

    pub fn data(name: impl Into<String>) -> Self {
        Self::new(name, Slot::Data)
    }

    pub fn getter(name: impl Into<String>) -> Self {
        Self::new(name, Slot::Getter)
    }

    pub fn setter(name: impl Into<String>) -> Self {
        Self::new(name, Slot::Setter)
    }

    pub fn accessor(name: impl Into<String>) -> Self {
        Self::new(name, Slot::Accessor)
    }
}
