//! Candidate member-bag extraction.
//!
//! Statics come from the constructor's own descriptors, instance members
//! from the behavior-template descriptors, fields from a textual scan of
//! the constructor source (see [`super::fields`]).

use typedrift_core::runtime::candidate::ClassCandidate;
use typedrift_core::runtime::value::Slot;
use typedrift_core::types::member_bag::ClassBag;

use super::fields::{has_param_constructor, FieldDiscovery};

/// Universal metadata keys every constructor owns; no structural signal.
const UNIVERSAL_STATIC_KEYS: [&str; 5] = ["length", "name", "prototype", "arguments", "caller"];

/// Extract the normalized bag of one mirrored constructor.
pub fn class_bag_from_candidate(
    candidate: &ClassCandidate,
    discovery: &dyn FieldDiscovery,
) -> ClassBag {
    let mut bag = ClassBag {
        has_param_constructor: has_param_constructor(&candidate.ctor_source),
        ..Default::default()
    };

    for descriptor in &candidate.statics {
        if UNIVERSAL_STATIC_KEYS.contains(&descriptor.name.as_str()) {
            continue;
        }
        match descriptor.slot {
            Slot::Data => {
                bag.static_methods_and_fields.insert(descriptor.name.clone());
            }
            Slot::Getter => {
                bag.static_getters.insert(descriptor.name.clone());
            }
            Slot::Setter => {
                bag.static_setters.insert(descriptor.name.clone());
            }
            Slot::Accessor => {
                bag.static_getters.insert(descriptor.name.clone());
                bag.static_setters.insert(descriptor.name.clone());
            }
        }
    }

    for descriptor in &candidate.template {
        if descriptor.name == "constructor" {
            continue;
        }
        match descriptor.slot {
            Slot::Data => {
                bag.methods.insert(descriptor.name.clone());
            }
            Slot::Getter => {
                bag.getters.insert(descriptor.name.clone());
            }
            Slot::Setter => {
                bag.setters.insert(descriptor.name.clone());
            }
            Slot::Accessor => {
                bag.getters.insert(descriptor.name.clone());
                bag.setters.insert(descriptor.name.clone());
            }
        }
    }

    bag.fields = discovery.discover(&candidate.ctor_source);
    bag
}

/// Extract and union the bags of several candidates implementing one
/// baseline type.
pub fn merged_class_bag<'a>(
    candidates: impl IntoIterator<Item = &'a ClassCandidate>,
    discovery: &dyn FieldDiscovery,
) -> ClassBag {
    let mut merged = ClassBag::default();
    for candidate in candidates {
        merged.union(&class_bag_from_candidate(candidate, discovery));
    }
    merged
}
