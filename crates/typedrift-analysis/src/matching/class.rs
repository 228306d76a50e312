//! Class drift scoring.

use typedrift_core::types::drift::ClassDrift;
use typedrift_core::types::member_bag::{ClassBag, MemberCategory};

/// Compute the drift between a (reconciled) baseline bag and a merged
/// candidate bag.
///
/// Deterministic and order-independent: `changed_count` equals the sum of
/// category-wise symmetric differences plus a constructor-shape mismatch
/// counted once per direction.
pub fn class_drift(baseline: &ClassBag, candidate: &ClassBag) -> ClassDrift {
    let mut drift = ClassDrift::default();

    // Constructor-shape flag. Both-absent carries no signal and counts
    // nothing.
    match (baseline.has_param_constructor, candidate.has_param_constructor) {
        (false, true) => drift.additions.has_param_constructor = true,
        (true, false) => drift.removals.has_param_constructor = true,
        (true, true) => drift.unchanged_count += 1,
        (false, false) => {}
    }

    for cat in MemberCategory::all() {
        // Working copy of the candidate set; matched members are removed
        // so they cannot double-count as additions.
        let mut working = candidate.category(*cat).clone();
        for name in baseline.category(*cat) {
            if working.remove(name) {
                drift.unchanged_count += 1;
            } else {
                drift.removals.category_mut(*cat).insert(name.clone());
            }
        }
        *drift.additions.category_mut(*cat) = working;
    }

    drift.changed_count = drift.additions.member_count()
        + drift.removals.member_count()
        + usize::from(drift.additions.has_param_constructor)
        + usize::from(drift.removals.has_param_constructor);
    drift
}
