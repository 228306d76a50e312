//! Exhaustive enum search.

use typedrift_core::config::KeyMapper;
use typedrift_core::runtime::candidate::ModuleSnapshot;
use typedrift_core::types::drift::EnumDrift;
use typedrift_core::types::member_bag::EnumBag;

use crate::matching::enums::enum_drift;

use super::SearchMiss;

/// An accepted enum search result.
#[derive(Debug, Clone)]
pub struct EnumSearchHit {
    pub module_id: u32,
    pub export: String,
    pub drift: EnumDrift,
}

/// Scan every export of every module for the object whose entries drift
/// least from the baseline map.
///
/// Poisoned candidates are disqualified outright and can never win. Among
/// equal `changed_count`s the candidate with fewer removals is preferred,
/// biasing toward "the baseline was extended" over "the baseline was
/// replaced"; otherwise first-seen wins.
///
/// Acceptance gate: `unchanged_count > 0` — enums have no corroborating
/// structural-shape signal, so the bar is looser than for classes.
pub fn auto_find_enum(
    snapshot: &ModuleSnapshot,
    baseline: &EnumBag,
    mapper: Option<&KeyMapper>,
) -> Result<EnumSearchHit, SearchMiss> {
    let mut best: Option<EnumSearchHit> = None;

    for (module, export) in snapshot.exports() {
        let Some(candidate) = export.value.as_object() else {
            continue;
        };

        let drift = enum_drift(baseline, candidate, mapper);
        if drift.poisoned {
            continue;
        }

        let beats = match &best {
            Some(current) => {
                drift.changed_count < current.drift.changed_count
                    || (drift.changed_count == current.drift.changed_count
                        && drift.removals.len() < current.drift.removals.len())
            }
            None => true,
        };
        if beats {
            best = Some(EnumSearchHit {
                module_id: module.id,
                export: export.name.clone(),
                drift,
            });
        }
    }

    let hit = best.ok_or(SearchMiss::NoCandidates)?;
    if hit.drift.unchanged_count > 0 {
        Ok(hit)
    } else {
        Err(SearchMiss::GateRejected)
    }
}
