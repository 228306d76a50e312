//! Enum drift scoring.

use typedrift_core::config::KeyMapper;
use typedrift_core::runtime::candidate::EnumCandidate;
use typedrift_core::types::drift::{EnumDrift, POISONED_SCORE};
use typedrift_core::types::member_bag::EnumBag;

/// Compute the drift between a (reconciled) baseline map and a candidate
/// object.
///
/// Reverse-index keys (numeric strings, artifacts of numeric-enum reverse
/// lookup) are skipped. If reading any candidate value threw, the whole
/// candidate is disqualified: `changed_count` is forced to the poisoned
/// score and enumeration stops. The partial `unchanged_count` accumulated
/// before the poison is retained, not reset — selection never reads it
/// from a disqualified result, and resetting it could flip acceptance-gate
/// outcomes for callers that do.
pub fn enum_drift(
    baseline: &EnumBag,
    candidate: &EnumCandidate,
    mapper: Option<&KeyMapper>,
) -> EnumDrift {
    let mut drift = EnumDrift::default();
    let mut working = baseline.clone();

    for (raw_key, read) in &candidate.entries {
        if is_reverse_index_key(raw_key) {
            continue;
        }

        let value = match read {
            Ok(value) => value.clone(),
            Err(_) => {
                drift.poisoned = true;
                drift.changed_count = POISONED_SCORE;
                return drift;
            }
        };

        let key = match mapper {
            Some(mapper) => mapper.apply(raw_key),
            None => raw_key.clone(),
        };

        match working.get(&key) {
            Some(expected) if *expected == value => {
                working.remove(&key);
                drift.unchanged_count += 1;
            }
            _ => {
                drift.additions.insert(key, value);
            }
        }
    }

    drift.removals = working;
    drift.changed_count = drift.additions.len() + drift.removals.len();
    drift
}

/// Keys that are themselves numeric strings are reverse-index artifacts,
/// never original members.
fn is_reverse_index_key(key: &str) -> bool {
    !key.is_empty() && key.parse::<f64>().is_ok()
}
