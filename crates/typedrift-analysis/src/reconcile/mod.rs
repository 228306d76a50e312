//! Ignore reconciliation and the stale-exception validator.
//!
//! Declared exceptions are folded into the baseline *before* scoring so
//! expected drift never inflates `changed_count`. After scoring, the
//! validator cross-checks each exception against the drift actually
//! computed and flags entries that no longer apply — the exception lists
//! are expected to shrink to exactly the set of differences still
//! genuinely present.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use typedrift_core::config::{CategoryIgnore, DeclarationConfig, IgnoreSet};
use typedrift_core::types::drift::{ClassDrift, EnumDrift};
use typedrift_core::types::member_bag::{ClassBag, EnumBag, MemberCategory};

/// Exception shape for one class category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IgnoreSpec {
    #[default]
    None,
    Specific(BTreeSet<String>),
    EntireCategory,
}

/// Resolved class exceptions, per category and direction.
#[derive(Debug, Clone, Default)]
pub struct ClassIgnores {
    pub additions: BTreeMap<MemberCategory, IgnoreSpec>,
    pub removals: BTreeMap<MemberCategory, IgnoreSpec>,
}

/// Resolved enum removal exceptions.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumRemovalIgnores {
    #[default]
    None,
    Entries(EnumBag),
    EntireBag,
}

/// Resolved enum exceptions.
#[derive(Debug, Clone, Default)]
pub struct EnumIgnores {
    pub additions: EnumBag,
    pub removals: EnumRemovalIgnores,
}

// ---- Config resolution ----

/// Resolve a class declaration's exception config. Shape mistakes (enum
/// entries on a class, unknown category names) degrade to warnings.
pub fn class_ignores(config: &DeclarationConfig, warns: &mut Vec<String>) -> ClassIgnores {
    let mut ignores = ClassIgnores::default();
    if let Some(set) = &config.ignored_additions {
        ignores.additions = resolve_category_set(set, "ignored_additions", false, warns);
    }
    if let Some(set) = &config.ignored_removals {
        ignores.removals = resolve_category_set(set, "ignored_removals", true, warns);
    }
    ignores
}

fn resolve_category_set(
    set: &IgnoreSet,
    which: &str,
    entire_allowed: bool,
    warns: &mut Vec<String>,
) -> BTreeMap<MemberCategory, IgnoreSpec> {
    let mut resolved = BTreeMap::new();
    match set {
        IgnoreSet::Categories(map) => {
            for (name, ignore) in map {
                let Some(category) = MemberCategory::parse_str(name) else {
                    warns.push(format!("{which}: unknown member category {name:?}"));
                    continue;
                };
                match ignore {
                    CategoryIgnore::Names(names) => {
                        resolved.insert(
                            category,
                            IgnoreSpec::Specific(names.iter().cloned().collect()),
                        );
                    }
                    CategoryIgnore::Entire(true) if entire_allowed => {
                        resolved.insert(category, IgnoreSpec::EntireCategory);
                    }
                    CategoryIgnore::Entire(true) => {
                        warns.push(format!(
                            "{which}.{category}: entire-category ignores only apply to removals"
                        ));
                    }
                    CategoryIgnore::Entire(false) => {}
                }
            }
        }
        IgnoreSet::Entries(_) => {
            warns.push(format!(
                "{which}: enum-shaped exception list on a class declaration, ignored"
            ));
        }
        IgnoreSet::Everything(_) => {
            warns.push(format!(
                "{which}: class exceptions must name categories, ignored"
            ));
        }
    }
    resolved
}

/// Resolve an enum declaration's exception config.
pub fn enum_ignores(config: &DeclarationConfig, warns: &mut Vec<String>) -> EnumIgnores {
    let mut ignores = EnumIgnores::default();

    if let Some(set) = &config.ignored_additions {
        match set {
            IgnoreSet::Entries(entries) => ignores.additions = entries.clone(),
            IgnoreSet::Categories(_) => warns.push(
                "ignored_additions: class-shaped exception list on an enum declaration, ignored"
                    .to_string(),
            ),
            IgnoreSet::Everything(_) => warns.push(
                "ignored_additions: whole-bag ignores only apply to removals, ignored".to_string(),
            ),
        }
    }

    if let Some(set) = &config.ignored_removals {
        match set {
            IgnoreSet::Entries(entries) => {
                ignores.removals = EnumRemovalIgnores::Entries(entries.clone());
            }
            IgnoreSet::Everything(true) => ignores.removals = EnumRemovalIgnores::EntireBag,
            IgnoreSet::Everything(false) => {}
            IgnoreSet::Categories(_) => warns.push(
                "ignored_removals: class-shaped exception list on an enum declaration, ignored"
                    .to_string(),
            ),
        }
    }

    ignores
}

// ---- Reconciliation ----

/// Fold class exceptions into the baseline bag before scoring.
pub fn reconcile_class_baseline(baseline: &ClassBag, ignores: &ClassIgnores) -> ClassBag {
    let mut reconciled = baseline.clone();

    // Expected-to-exist members merge in so they register as unchanged.
    for (category, spec) in &ignores.additions {
        if let IgnoreSpec::Specific(names) = spec {
            reconciled
                .category_mut(*category)
                .extend(names.iter().cloned());
        }
    }

    // Expected-to-be-gone members strip out so their absence never
    // registers as a removal.
    for (category, spec) in &ignores.removals {
        match spec {
            IgnoreSpec::Specific(names) => {
                for name in names {
                    reconciled.category_mut(*category).remove(name);
                }
            }
            IgnoreSpec::EntireCategory => {
                reconciled.category_mut(*category).clear();
            }
            IgnoreSpec::None => {}
        }
    }

    reconciled
}

/// Fold enum exceptions into the baseline map before scoring. Removal
/// entries strip only exact key/value pairs; a key carrying a different
/// value stays, and the validator will flag the exception.
pub fn reconcile_enum_baseline(baseline: &EnumBag, ignores: &EnumIgnores) -> EnumBag {
    let mut reconciled = baseline.clone();

    for (key, value) in &ignores.additions {
        reconciled.insert(key.clone(), value.clone());
    }

    match &ignores.removals {
        EnumRemovalIgnores::Entries(entries) => {
            for (key, value) in entries {
                if reconciled.get(key) == Some(value) {
                    reconciled.remove(key);
                }
            }
        }
        EnumRemovalIgnores::EntireBag => reconciled.clear(),
        EnumRemovalIgnores::None => {}
    }

    reconciled
}

// ---- Validation ----

/// Flag class exceptions the computed drift proves unnecessary.
pub fn validate_class_ignores(ignores: &ClassIgnores, drift: &ClassDrift) -> Vec<String> {
    let mut warns = Vec::new();

    for (category, spec) in &ignores.additions {
        if let IgnoreSpec::Specific(names) = spec {
            for name in names {
                if drift.removals.category(*category).contains(name) {
                    warns.push(format!(
                        "ignored addition {category}.{name} had no effect: member does not exist in target"
                    ));
                }
            }
        }
    }

    for (category, spec) in &ignores.removals {
        match spec {
            IgnoreSpec::Specific(names) => {
                for name in names {
                    if drift.additions.category(*category).contains(name) {
                        warns.push(format!(
                            "ignored removal {category}.{name} had no effect: member still exists in target"
                        ));
                    }
                }
            }
            IgnoreSpec::EntireCategory => {
                if !drift.additions.category(*category).is_empty() {
                    warns.push(format!(
                        "ignored removal of entire category {category} had no effect: members still exist in target"
                    ));
                }
            }
            IgnoreSpec::None => {}
        }
    }

    warns
}

/// Flag enum exceptions the computed drift proves unnecessary.
pub fn validate_enum_ignores(ignores: &EnumIgnores, drift: &EnumDrift) -> Vec<String> {
    let mut warns = Vec::new();

    for key in ignores.additions.keys() {
        if drift.removals.contains_key(key) {
            warns.push(format!(
                "ignored addition {key} had no effect: member does not exist in target"
            ));
        }
    }

    match &ignores.removals {
        EnumRemovalIgnores::Entries(entries) => {
            for key in entries.keys() {
                if drift.additions.contains_key(key) {
                    warns.push(format!(
                        "ignored removal {key} had no effect: member still exists in target"
                    ));
                }
            }
        }
        EnumRemovalIgnores::EntireBag => {
            if !drift.additions.is_empty() {
                warns.push(
                    "ignored removal of entire enum had no effect: members still exist in target"
                        .to_string(),
                );
            }
        }
        EnumRemovalIgnores::None => {}
    }

    warns
}
