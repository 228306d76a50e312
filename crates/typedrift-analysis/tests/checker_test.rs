//! End-to-end checker tests over the in-memory runtime: the three-stage
//! lookup fallback, config degradation, bucketing, and file-level errors.

use std::sync::Arc;

use typedrift_analysis::checker::runner::Checker;
use typedrift_core::config::CheckConfig;
use typedrift_core::errors::{ProbeError, SourceError};
use typedrift_core::runtime::candidate::{
    CandidateId, ClassCandidate, EnumCandidate, ExportValue, Module, ModuleExport, ModuleSnapshot,
};
use typedrift_core::runtime::memory::MemoryRuntime;
use typedrift_core::runtime::value::PropertyDescriptor;
use typedrift_core::types::drift::DriftChanges;
use typedrift_core::types::member_bag::EnumValue;

// ─── Fixtures ─────────────────────────────────────────────────────────────

const BASELINE: &str = r#"
export class ChannelRecord {
    constructor(data: unknown) {}
    guildId: string;
    isThread() { return false; }
    get mention() { return ""; }
}

export class DraftStore {
    getDraft(channelId: string) {}
    saveDraft(channelId: string, draft: string) {}
}

export enum MessageFlags {
    CROSSPOSTED = 1,
    SUPPRESS_EMBEDS = 4,
}
"#;

/// The live ChannelRecord: everything the baseline declares plus one new
/// field.
fn channel_record(id: u64) -> ClassCandidate {
    ClassCandidate {
        id: CandidateId(id),
        template: vec![
            PropertyDescriptor::data("isThread"),
            PropertyDescriptor::getter("mention"),
        ],
        ctor_source: concat!(
            "constructor(e){",
            "(0,n.default)(this,\"guildId\",e.guild_id);",
            "(0,n.default)(this,\"threadMetadata\",void 0)",
            "}"
        )
        .to_string(),
        ..Default::default()
    }
}

fn decoy_class(id: u64) -> ClassCandidate {
    ClassCandidate {
        id: CandidateId(id),
        template: vec![PropertyDescriptor::data("dispatch")],
        ..Default::default()
    }
}

fn draft_store_instance(id: u64) -> ExportValue {
    ExportValue::Object {
        object: EnumCandidate::default(),
        constructor: Some(ClassCandidate {
            id: CandidateId(id),
            template: vec![
                PropertyDescriptor::data("getDraft"),
                PropertyDescriptor::data("saveDraft"),
            ],
            display_name: Some("DraftStore".to_string()),
            ..Default::default()
        }),
    }
}

fn message_flags(id: u64) -> EnumCandidate {
    EnumCandidate::from_entries(
        CandidateId(id),
        [
            ("CROSSPOSTED".to_string(), EnumValue::Num(1.0)),
            ("SUPPRESS_EMBEDS".to_string(), EnumValue::Num(4.0)),
            // Reverse-index artifacts of the numeric enum.
            ("1".to_string(), EnumValue::Str("CROSSPOSTED".to_string())),
            ("4".to_string(), EnumValue::Str("SUPPRESS_EMBEDS".to_string())),
        ],
    )
}

fn target_snapshot() -> ModuleSnapshot {
    ModuleSnapshot::new(vec![
        Module {
            id: 1,
            exports: vec![
                ModuleExport {
                    name: "Z".to_string(),
                    value: ExportValue::Class(decoy_class(10)),
                },
                ModuleExport {
                    name: "R".to_string(),
                    value: ExportValue::Class(channel_record(11)),
                },
            ],
        },
        Module {
            id: 2,
            exports: vec![
                ModuleExport {
                    name: "default".to_string(),
                    value: draft_store_instance(20),
                },
                ModuleExport {
                    name: "F".to_string(),
                    value: ExportValue::Object {
                        object: message_flags(21),
                        constructor: None,
                    },
                },
            ],
        },
    ])
}

fn checker(runtime: MemoryRuntime) -> Checker {
    Checker::new(Arc::new(runtime))
}

fn config(text: &str) -> CheckConfig {
    CheckConfig::from_toml_str(text).expect("config parses")
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn exhaustive_search_finds_every_declaration() {
    let checker = checker(MemoryRuntime::new(target_snapshot()));
    let report = checker
        .check_source("baseline.ts", BASELINE, &CheckConfig::default())
        .await
        .expect("file checks");

    assert_eq!(report.total(), 3);
    assert!(report.errored.is_empty(), "errored: {:?}", report.errored);

    // ChannelRecord gained threadMetadata in the target.
    let changed = &report.changed;
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].identifier, "ChannelRecord");
    match changed[0].changes.as_ref().expect("has drift") {
        DriftChanges::Class(drift) => {
            assert!(drift.additions.fields.contains("threadMetadata"));
            assert_eq!(drift.changed_count, 1);
        }
        other => panic!("expected class drift, got {other:?}"),
    }

    // DraftStore (store fast path) and MessageFlags are clean.
    assert_eq!(report.unchanged.len(), 2);
}

#[tokio::test]
async fn explicit_lookup_is_tried_before_any_search() {
    let mut runtime = MemoryRuntime::new(ModuleSnapshot::default());
    runtime.register_lookup(
        "findChannelRecord()",
        vec![ExportValue::Class(channel_record(50))],
    );

    let source = r#"
        class ChannelRecord {
            constructor(data: unknown) {}
            guildId: string;
            isThread() { return false; }
            get mention() { return ""; }
        }
    "#;
    let cfg = config(
        r#"
        [ChannelRecord]
        kind = "class"
        find = "findChannelRecord()"
        "#,
    );

    // The snapshot is empty, so only the explicit lookup can succeed.
    let report = checker(runtime)
        .check_source("baseline.ts", source, &cfg)
        .await
        .expect("file checks");

    assert_eq!(report.changed.len(), 1);
    assert!(report.errored.is_empty());
}

#[tokio::test]
async fn failed_lookup_falls_back_to_search_with_a_warning() {
    let mut runtime = MemoryRuntime::new(target_snapshot());
    runtime.register_throwing_lookup("findChannelRecord()", "not ready");

    let source = r#"
        class ChannelRecord {
            constructor(data: unknown) {}
            guildId: string;
            isThread() { return false; }
            get mention() { return ""; }
        }
    "#;
    let cfg = config(
        r#"
        [ChannelRecord]
        find = "findChannelRecord()"
        "#,
    );

    let report = checker(runtime)
        .check_source("baseline.ts", source, &cfg)
        .await
        .expect("file checks");

    assert_eq!(report.changed.len(), 1);
    let decl = &report.changed[0];
    assert!(decl.warns.iter().any(|w| w.contains("lookup failed")));
    assert!(decl.changes.is_some(), "search still produced a match");
}

#[tokio::test]
async fn kind_mismatch_degrades_config_with_a_warning() {
    let runtime = MemoryRuntime::new(target_snapshot());
    let source = r#"
        enum MessageFlags {
            CROSSPOSTED = 1,
            SUPPRESS_EMBEDS = 4,
        }
    "#;
    // The config claims a class; the source declares an enum.
    let cfg = config(
        r#"
        [MessageFlags]
        kind = "class"
        include_optional = true
        "#,
    );

    let report = checker(runtime)
        .check_source("baseline.ts", source, &cfg)
        .await
        .expect("file checks");

    assert_eq!(report.warned.len(), 1);
    let decl = &report.warned[0];
    assert!(decl.warns.iter().any(|w| w.contains("config ignored")));
    assert!(decl.changes.as_ref().is_some_and(DriftChanges::is_clean));
}

#[tokio::test]
async fn ignored_removals_shrink_drift_and_stale_ones_warn() {
    let runtime = MemoryRuntime::new(target_snapshot());
    let source = r#"
        enum MessageFlags {
            CROSSPOSTED = 1,
            SUPPRESS_EMBEDS = 4,
            SOURCE_MESSAGE_DELETED = 8,
        }
    "#;
    let cfg = config(
        r#"
        [MessageFlags]
        kind = "enum"
        ignored_removals = { SOURCE_MESSAGE_DELETED = 8, CROSSPOSTED = 1 }
        "#,
    );

    let report = checker(runtime)
        .check_source("baseline.ts", source, &cfg)
        .await
        .expect("file checks");

    // SOURCE_MESSAGE_DELETED really is gone; CROSSPOSTED is not, so its
    // exception re-surfaces CROSSPOSTED as an addition and draws a flag.
    assert_eq!(report.warned.len() + report.changed.len(), 1);
    let decl = report
        .warned
        .first()
        .or_else(|| report.changed.first())
        .expect("one result");
    assert!(decl
        .warns
        .iter()
        .any(|w| w.contains("CROSSPOSTED") && w.contains("had no effect")));
}

#[tokio::test]
async fn unfindable_declaration_is_a_declaration_level_error_only() {
    let source = r#"
        class Unfindable {
            constructor(a: number) {}
            someMethod() {}
            otherMethod() {}
        }
        enum Present {
            A = 1,
        }
    "#;

    // Give the enum something to match so only the class errors.
    let runtime = MemoryRuntime::new(ModuleSnapshot::new(vec![Module {
        id: 1,
        exports: vec![ModuleExport {
            name: "P".to_string(),
            value: ExportValue::Object {
                object: EnumCandidate::from_entries(
                    CandidateId(1),
                    [("A".to_string(), EnumValue::Num(1.0))],
                ),
                constructor: None,
            },
        }],
    }]));

    let report = checker(runtime)
        .check_source("baseline.ts", source, &CheckConfig::default())
        .await
        .expect("file still reports");

    assert_eq!(report.errored.len(), 1);
    assert_eq!(report.errored[0].identifier, "Unfindable");
    assert!(report.errored[0].error.as_ref().is_some_and(|e| e.contains("no candidate")));
    assert_eq!(report.unchanged.len(), 1);
}

#[tokio::test]
async fn poisoned_explicit_lookup_falls_through_to_search() {
    let mut runtime = MemoryRuntime::new(target_snapshot());
    runtime.register_lookup(
        "findFlags()",
        vec![ExportValue::Object {
            object: EnumCandidate {
                id: CandidateId(90),
                entries: vec![(
                    "CROSSPOSTED".to_string(),
                    Err(ProbeError::ValueUnreadable {
                        key: "CROSSPOSTED".to_string(),
                        message: "getter threw".to_string(),
                    }),
                )],
            },
            constructor: None,
        }],
    );

    let source = r#"
        enum MessageFlags {
            CROSSPOSTED = 1,
            SUPPRESS_EMBEDS = 4,
        }
    "#;
    let cfg = config(
        r#"
        [MessageFlags]
        find = "findFlags()"
        "#,
    );

    let report = checker(runtime)
        .check_source("baseline.ts", source, &cfg)
        .await
        .expect("file checks");

    let decl = report
        .warned
        .first()
        .expect("falls back with a warning");
    assert!(decl.warns.iter().any(|w| w.contains("disqualified")));
    assert!(decl.changes.as_ref().is_some_and(DriftChanges::is_clean));
}

#[tokio::test]
async fn field_discovery_strategy_is_swappable() {
    // The target build initializes fields by direct assignment, which the
    // default helper-call scan cannot see.
    let candidate = ClassCandidate {
        id: CandidateId(70),
        template: vec![PropertyDescriptor::data("update")],
        ctor_source: "constructor(e){this.id=e.id;this.name=e.name}".to_string(),
        ..Default::default()
    };
    let snapshot = ModuleSnapshot::new(vec![Module {
        id: 1,
        exports: vec![ModuleExport {
            name: "R".to_string(),
            value: ExportValue::Class(candidate),
        }],
    }]);

    let source = r#"
        class Record {
            constructor(data: unknown) {}
            id: string;
            name: string;
            update(data: unknown) {}
        }
    "#;

    let default_report = checker(MemoryRuntime::new(snapshot.clone()))
        .check_source("baseline.ts", source, &CheckConfig::default())
        .await
        .expect("file checks");
    match default_report.changed[0].changes.as_ref().expect("drift") {
        DriftChanges::Class(drift) => {
            assert!(drift.removals.fields.contains("id"), "fields invisible to the default idiom");
        }
        other => panic!("expected class drift, got {other:?}"),
    }

    let swapped = Checker::new(Arc::new(MemoryRuntime::new(snapshot)))
        .with_field_discovery(Box::new(
            typedrift_analysis::candidates::fields::ThisAssignmentScan,
        ));
    let report = swapped
        .check_source("baseline.ts", source, &CheckConfig::default())
        .await
        .expect("file checks");
    assert_eq!(report.unchanged.len(), 1, "swapped idiom sees every field");
}

#[tokio::test]
async fn unparseable_source_short_circuits_the_file() {
    let checker = checker(MemoryRuntime::new(target_snapshot()));
    let err = checker
        .check_source("broken.ts", "class {{{{", &CheckConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Unparseable { .. }));
}
