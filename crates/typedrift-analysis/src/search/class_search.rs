//! Exhaustive class search.

use rustc_hash::FxHashSet;

use typedrift_core::runtime::candidate::{ClassCandidate, ModuleSnapshot};
use typedrift_core::types::drift::ClassDrift;
use typedrift_core::types::member_bag::ClassBag;

use crate::candidates::extract::class_bag_from_candidate;
use crate::candidates::fields::FieldDiscovery;
use crate::matching::class::class_drift;

use super::SearchMiss;

/// An accepted class search result.
#[derive(Debug, Clone)]
pub struct ClassSearchHit {
    pub module_id: u32,
    pub export: String,
    pub candidate: ClassCandidate,
    pub drift: ClassDrift,
}

/// Scan every export of every module for the constructor whose bag drifts
/// least from the baseline.
///
/// The strictly lowest `changed_count` wins; first-seen wins ties (class
/// drift is structurally constrained enough that no explicit tie-break is
/// needed). A per-run identity set prevents re-scoring the same
/// constructor reached through several exports.
///
/// Acceptance gate: the winner is accepted only with `unchanged_count >
/// 1`, or `unchanged_count > 0` together with a differing
/// constructor-shape flag — a single incidental member match is never
/// sufficient evidence.
pub fn auto_find_class(
    snapshot: &ModuleSnapshot,
    baseline: &ClassBag,
    discovery: &dyn FieldDiscovery,
) -> Result<ClassSearchHit, SearchMiss> {
    let mut seen = FxHashSet::default();
    let mut best: Option<ClassSearchHit> = None;

    for (module, export) in snapshot.exports() {
        let Some(candidate) = export.value.as_constructor() else {
            continue;
        };
        if !seen.insert(candidate.id) {
            continue;
        }

        let bag = class_bag_from_candidate(candidate, discovery);
        let drift = class_drift(baseline, &bag);

        let beats = match &best {
            Some(current) => drift.changed_count < current.drift.changed_count,
            None => true,
        };
        if beats {
            best = Some(ClassSearchHit {
                module_id: module.id,
                export: export.name.clone(),
                candidate: candidate.clone(),
                drift,
            });
        }
    }

    let hit = best.ok_or(SearchMiss::NoCandidates)?;
    let accepted = hit.drift.unchanged_count > 1
        || (hit.drift.unchanged_count > 0 && hit.drift.constructor_shape_differs());
    if accepted {
        Ok(hit)
    } else {
        Err(SearchMiss::GateRejected)
    }
}
