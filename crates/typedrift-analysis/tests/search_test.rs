//! Exhaustive-search tests: best-match selection, identity dedup,
//! acceptance gates, the enum tie-break, poisoning, and the store fast
//! path.

use typedrift_analysis::candidates::fields::DefineCallScan;
use typedrift_analysis::search::{
    auto_find_class, auto_find_enum, auto_find_store, SearchMiss,
};
use typedrift_core::errors::ProbeError;
use typedrift_core::runtime::candidate::{
    CandidateId, ClassCandidate, EnumCandidate, ExportValue, Module, ModuleExport, ModuleSnapshot,
};
use typedrift_core::runtime::value::PropertyDescriptor;
use typedrift_core::types::member_bag::{ClassBag, EnumBag, EnumValue};

// ─── Helpers ──────────────────────────────────────────────────────────────

fn class_export(name: &str, candidate: ClassCandidate) -> ModuleExport {
    ModuleExport {
        name: name.to_string(),
        value: ExportValue::Class(candidate),
    }
}

fn object_export(name: &str, object: EnumCandidate) -> ModuleExport {
    ModuleExport {
        name: name.to_string(),
        value: ExportValue::Object {
            object,
            constructor: None,
        },
    }
}

fn snapshot(exports: Vec<ModuleExport>) -> ModuleSnapshot {
    ModuleSnapshot::new(vec![Module { id: 1, exports }])
}

fn methods_candidate(id: u64, methods: &[&str]) -> ClassCandidate {
    ClassCandidate {
        id: CandidateId(id),
        template: methods
            .iter()
            .map(|m| PropertyDescriptor::data(*m))
            .collect(),
        ..Default::default()
    }
}

fn methods_baseline(methods: &[&str]) -> ClassBag {
    ClassBag {
        methods: methods.iter().map(|m| m.to_string()).collect(),
        ..Default::default()
    }
}

fn enum_baseline(entries: &[(&str, f64)]) -> EnumBag {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), EnumValue::Num(*v)))
        .collect()
}

fn enum_candidate(id: u64, entries: &[(&str, f64)]) -> EnumCandidate {
    EnumCandidate::from_entries(
        CandidateId(id),
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), EnumValue::Num(*v))),
    )
}

// ─── Class search ─────────────────────────────────────────────────────────

#[test]
fn lowest_drift_candidate_wins() {
    let baseline = methods_baseline(&["alpha", "beta", "gamma"]);
    let snap = snapshot(vec![
        class_export("a", methods_candidate(1, &["alpha"])),
        class_export("b", methods_candidate(2, &["alpha", "beta", "gamma", "delta"])),
        class_export("c", methods_candidate(3, &["zzz"])),
    ]);

    let hit = auto_find_class(&snap, &baseline, &DefineCallScan).expect("accepted");
    assert_eq!(hit.export, "b");
    assert_eq!(hit.drift.changed_count, 1);
    assert_eq!(hit.drift.unchanged_count, 3);
}

#[test]
fn first_seen_wins_class_ties() {
    let baseline = methods_baseline(&["alpha", "beta"]);
    let snap = snapshot(vec![
        class_export("first", methods_candidate(1, &["alpha", "beta"])),
        class_export("second", methods_candidate(2, &["alpha", "beta"])),
    ]);

    let hit = auto_find_class(&snap, &baseline, &DefineCallScan).expect("accepted");
    assert_eq!(hit.export, "first");
}

#[test]
fn shared_constructor_identity_is_scored_once() {
    let baseline = methods_baseline(&["alpha", "beta"]);
    let shared = methods_candidate(42, &["alpha", "beta"]);
    let snap = snapshot(vec![
        class_export("a", shared.clone()),
        class_export("b", shared),
    ]);

    let hit = auto_find_class(&snap, &baseline, &DefineCallScan).expect("accepted");
    assert_eq!(hit.export, "a");
}

#[test]
fn single_incidental_member_match_is_rejected() {
    // One shared trivial member is not evidence.
    let baseline = methods_baseline(&["toString", "somethingElse"]);
    let snap = snapshot(vec![class_export("a", methods_candidate(1, &["toString"]))]);

    assert_eq!(
        auto_find_class(&snap, &baseline, &DefineCallScan).unwrap_err(),
        SearchMiss::GateRejected
    );
}

#[test]
fn constructor_shape_signal_lowers_the_gate() {
    // unchanged_count == 1 alone fails the gate, but a differing
    // constructor-shape flag corroborates the match.
    let baseline = methods_baseline(&["update"]);
    let candidate = ClassCandidate {
        id: CandidateId(1),
        template: vec![PropertyDescriptor::data("update")],
        ctor_source: "constructor(e){}".to_string(),
        ..Default::default()
    };
    let snap = snapshot(vec![class_export("a", candidate)]);

    let hit = auto_find_class(&snap, &baseline, &DefineCallScan).expect("accepted");
    assert!(hit.drift.constructor_shape_differs());
    assert_eq!(hit.drift.unchanged_count, 1);
}

#[test]
fn empty_snapshot_reports_no_candidates() {
    let baseline = methods_baseline(&["anything"]);
    let snap = snapshot(vec![ModuleExport {
        name: "data".to_string(),
        value: ExportValue::Opaque,
    }]);

    assert_eq!(
        auto_find_class(&snap, &baseline, &DefineCallScan).unwrap_err(),
        SearchMiss::NoCandidates
    );
}

// ─── Enum search ──────────────────────────────────────────────────────────

#[test]
fn equal_scores_prefer_fewer_removals() {
    let baseline = enum_baseline(&[("A", 1.0), ("B", 2.0)]);
    // Both drift by 2, but the extension keeps every baseline member.
    let replaced = enum_candidate(1, &[("A", 1.0), ("C", 3.0)]);
    let extended = enum_candidate(2, &[("A", 1.0), ("B", 2.0), ("C", 3.0), ("D", 4.0)]);
    let snap = snapshot(vec![
        object_export("replaced", replaced),
        object_export("extended", extended),
    ]);

    let hit = auto_find_enum(&snap, &baseline, None).expect("accepted");
    assert_eq!(hit.export, "extended");
    assert!(hit.drift.removals.is_empty());
}

#[test]
fn poisoned_candidate_never_wins() {
    let baseline = enum_baseline(&[("A", 1.0), ("B", 2.0)]);
    // The poisoned candidate would otherwise be a perfect match.
    let poisoned = EnumCandidate {
        id: CandidateId(1),
        entries: vec![
            ("A".to_string(), Ok(EnumValue::Num(1.0))),
            (
                "B".to_string(),
                Err(ProbeError::ValueUnreadable {
                    key: "B".to_string(),
                    message: "getter threw".to_string(),
                }),
            ),
        ],
    };
    let imperfect = enum_candidate(2, &[("A", 1.0), ("X", 9.0)]);
    let snap = snapshot(vec![
        object_export("poisoned", poisoned),
        object_export("imperfect", imperfect),
    ]);

    let hit = auto_find_enum(&snap, &baseline, None).expect("accepted");
    assert_eq!(hit.export, "imperfect");
}

#[test]
fn all_poisoned_means_no_candidates() {
    let baseline = enum_baseline(&[("A", 1.0)]);
    let poisoned = EnumCandidate {
        id: CandidateId(1),
        entries: vec![(
            "A".to_string(),
            Err(ProbeError::ValueUnreadable {
                key: "A".to_string(),
                message: "getter threw".to_string(),
            }),
        )],
    };
    let snap = snapshot(vec![object_export("poisoned", poisoned)]);

    assert_eq!(
        auto_find_enum(&snap, &baseline, None).unwrap_err(),
        SearchMiss::NoCandidates
    );
}

#[test]
fn zero_overlap_is_rejected_by_the_enum_gate() {
    let baseline = enum_baseline(&[("A", 1.0)]);
    let snap = snapshot(vec![object_export(
        "unrelated",
        enum_candidate(1, &[("X", 9.0)]),
    )]);

    assert_eq!(
        auto_find_enum(&snap, &baseline, None).unwrap_err(),
        SearchMiss::GateRejected
    );
}

// ─── Store fast path ──────────────────────────────────────────────────────

fn store_instance(id: u64, display_name: Option<&str>, persist_key: Option<&str>) -> ModuleExport {
    let constructor = ClassCandidate {
        id: CandidateId(id),
        template: vec![
            PropertyDescriptor::data("getDraft"),
            PropertyDescriptor::data("saveDraft"),
        ],
        display_name: display_name.map(str::to_string),
        persist_key: persist_key.map(str::to_string),
        ..Default::default()
    };
    ModuleExport {
        name: format!("store{id}"),
        value: ExportValue::Object {
            object: EnumCandidate::default(),
            constructor: Some(constructor),
        },
    }
}

#[test]
fn store_is_found_by_display_name_or_versioned_persist_key() {
    let baseline = methods_baseline(&["getDraft", "saveDraft"]);

    let by_name = snapshot(vec![store_instance(1, Some("DraftStore"), None)]);
    let hit = auto_find_store(&by_name, "DraftStore", &baseline, &DefineCallScan)
        .expect("found by display name");
    assert_eq!(hit.drift.changed_count, 0);

    let by_key = snapshot(vec![store_instance(2, None, Some("DraftStoreV3"))]);
    assert!(auto_find_store(&by_key, "DraftStore", &baseline, &DefineCallScan).is_some());
}

#[test]
fn ambiguous_store_matches_fall_through() {
    let baseline = methods_baseline(&["getDraft"]);
    let snap = snapshot(vec![
        store_instance(1, Some("DraftStore"), None),
        store_instance(2, Some("DraftStore"), None),
    ]);

    assert!(auto_find_store(&snap, "DraftStore", &baseline, &DefineCallScan).is_none());
}

#[test]
fn reexported_store_instance_is_not_ambiguity() {
    let baseline = methods_baseline(&["getDraft", "saveDraft"]);
    let mut first = store_instance(7, Some("DraftStore"), None);
    first.name = "a".to_string();
    let mut second = store_instance(7, Some("DraftStore"), None);
    second.name = "b".to_string();
    let snap = snapshot(vec![first, second]);

    let hit =
        auto_find_store(&snap, "DraftStore", &baseline, &DefineCallScan).expect("one identity");
    assert_eq!(hit.export, "a");
}
