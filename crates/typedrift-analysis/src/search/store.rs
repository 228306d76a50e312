//! Store fast path — a narrow, cheap search for class declarations that
//! follow the store naming/identity convention. Tried after an explicit
//! lookup fails and before the exhaustive search.

use typedrift_core::runtime::candidate::{ClassCandidate, ExportValue, ModuleSnapshot};
use typedrift_core::types::drift::ClassDrift;
use typedrift_core::types::member_bag::ClassBag;

use crate::candidates::extract::class_bag_from_candidate;
use crate::candidates::fields::FieldDiscovery;
use crate::matching::class::class_drift;

/// A store fast-path result.
#[derive(Debug, Clone)]
pub struct StoreSearchHit {
    pub module_id: u32,
    pub export: String,
    pub candidate: ClassCandidate,
    pub drift: ClassDrift,
}

/// Whether a declaration is eligible for the store fast path.
pub fn is_store_declaration(identifier: &str, is_abstract: bool) -> bool {
    !is_abstract && identifier.ends_with("Store")
}

/// Whether a persistence key identifies the store: exactly the identifier,
/// or the identifier followed by a `V<digits>` version suffix.
fn persist_key_matches(identifier: &str, key: &str) -> bool {
    if key == identifier {
        return true;
    }
    key.strip_prefix(identifier)
        .and_then(|rest| rest.strip_prefix('V'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Search the snapshot for a single exported instance whose constructor
/// carries the declaration's identity. Scored directly — no competition
/// against alternatives — but only when exactly one instance matches;
/// zero or several fall through to the exhaustive search.
pub fn auto_find_store(
    snapshot: &ModuleSnapshot,
    identifier: &str,
    baseline: &ClassBag,
    discovery: &dyn FieldDiscovery,
) -> Option<StoreSearchHit> {
    let mut found: Option<(u32, String, &ClassCandidate)> = None;

    for (module, export) in snapshot.exports() {
        let ExportValue::Object {
            constructor: Some(candidate),
            ..
        } = &export.value
        else {
            continue;
        };

        let named = candidate.display_name.as_deref() == Some(identifier);
        let keyed = candidate
            .persist_key
            .as_deref()
            .is_some_and(|key| persist_key_matches(identifier, key));
        if !named && !keyed {
            continue;
        }

        match &found {
            // The same instance re-exported elsewhere is not ambiguity.
            Some((_, _, existing)) if existing.id == candidate.id => {}
            // Two distinct matches — let the exhaustive search decide.
            Some(_) => return None,
            None => found = Some((module.id, export.name.clone(), candidate)),
        }
    }

    let (module_id, export, candidate) = found?;
    let bag = class_bag_from_candidate(candidate, discovery);
    Some(StoreSearchHit {
        module_id,
        export,
        candidate: candidate.clone(),
        drift: class_drift(baseline, &bag),
    })
}
