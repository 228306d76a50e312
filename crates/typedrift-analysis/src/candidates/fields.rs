//! Field discovery — textual scans of a constructor's exposed source.
//!
//! Instance fields never appear on the shared behavior template; they are
//! assigned per-instance inside the constructor body. The only way to
//! enumerate them is to scan the constructor's source representation for a
//! known field-initialization idiom. Each supported compilation idiom is
//! one [`FieldDiscovery`] implementation; a constructor compiled through
//! any other idiom yields an incomplete field set.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Strategy interface for recovering instance field names from
/// constructor source text.
pub trait FieldDiscovery: Send + Sync {
    /// Short name of the idiom this strategy recognizes.
    fn idiom(&self) -> &'static str;

    /// Collect every field identifier the constructor initializes.
    fn discover(&self, ctor_source: &str) -> BTreeSet<String>;
}

/// The helper-call idiom: field initialization lowered to a call binding
/// this instance to a string-literal field name, e.g.
/// `(0, r.default)(this, "guildId", void 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefineCallScan;

static DEFINE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(\s*this\s*,\s*["']([A-Za-z_$][A-Za-z0-9_$]*)["']\s*,"#)
        .unwrap_or_else(|e| panic!("invalid field-scan pattern: {e}"))
});

impl FieldDiscovery for DefineCallScan {
    fn idiom(&self) -> &'static str {
        "define-call"
    }

    fn discover(&self, ctor_source: &str) -> BTreeSet<String> {
        DEFINE_CALL
            .captures_iter(ctor_source)
            .map(|c| c[1].to_string())
            .collect()
    }
}

/// The direct-assignment idiom: `this.fieldName = …` in the constructor
/// body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThisAssignmentScan;

static THIS_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bthis\.([A-Za-z_$][A-Za-z0-9_$]*)\s*=[^=]")
        .unwrap_or_else(|e| panic!("invalid field-scan pattern: {e}"))
});

impl FieldDiscovery for ThisAssignmentScan {
    fn idiom(&self) -> &'static str {
        "this-assignment"
    }

    fn discover(&self, ctor_source: &str) -> BTreeSet<String> {
        THIS_ASSIGNMENT
            .captures_iter(ctor_source)
            .map(|c| c[1].to_string())
            .collect()
    }
}

/// The default strategy for current target builds.
pub fn default_discovery() -> Box<dyn FieldDiscovery> {
    Box::new(DefineCallScan)
}

static PARAM_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"constructor\s*\(([^)]*)\)")
        .unwrap_or_else(|e| panic!("invalid constructor pattern: {e}"))
});

/// Whether the source defines a constructor with at least one declared
/// parameter. Zero-parameter constructors convey no structural signal and
/// are treated identically to no constructor.
pub fn has_param_constructor(ctor_source: &str) -> bool {
    PARAM_CONSTRUCTOR
        .captures(ctor_source)
        .is_some_and(|c| !c[1].trim().is_empty())
}
