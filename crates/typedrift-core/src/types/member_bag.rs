//! Normalized member bags — the unit of comparison between a baseline
//! declaration and a live candidate.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A value carried by an enum member. Only strings and numbers occur in
/// the wire format; everything else disqualifies the candidate upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Str(String),
    Num(f64),
}

impl EnumValue {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    pub fn num(n: impl Into<f64>) -> Self {
        Self::Num(n.into())
    }
}

impl std::fmt::Display for EnumValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

/// Normalized shape of an enum: key → value, reverse-index entries already
/// excluded.
pub type EnumBag = BTreeMap<String, EnumValue>;

/// The six member categories of a class bag. The constructor-shape flag is
/// tracked separately on [`ClassBag`] since it is a boolean, not a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberCategory {
    StaticMethodsAndFields,
    StaticGetters,
    StaticSetters,
    Methods,
    Getters,
    Setters,
    Fields,
}

impl MemberCategory {
    /// All six categories, in comparison order.
    pub fn all() -> &'static [MemberCategory] {
        &[
            Self::StaticMethodsAndFields,
            Self::StaticGetters,
            Self::StaticSetters,
            Self::Methods,
            Self::Getters,
            Self::Setters,
            Self::Fields,
        ]
    }

    /// Category name as a string (the config-file spelling).
    pub fn name(&self) -> &'static str {
        match self {
            Self::StaticMethodsAndFields => "static_methods_and_fields",
            Self::StaticGetters => "static_getters",
            Self::StaticSetters => "static_setters",
            Self::Methods => "methods",
            Self::Getters => "getters",
            Self::Setters => "setters",
            Self::Fields => "fields",
        }
    }

    /// Parse from the config-file spelling.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "static_methods_and_fields" => Some(Self::StaticMethodsAndFields),
            "static_getters" => Some(Self::StaticGetters),
            "static_setters" => Some(Self::StaticSetters),
            "methods" => Some(Self::Methods),
            "getters" => Some(Self::Getters),
            "setters" => Some(Self::Setters),
            "fields" => Some(Self::Fields),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized shape of a class, baseline or candidate.
///
/// Within one extraction a name occupies exactly one category per
/// static/instance axis, except that a name may appear in both `getters`
/// and `setters` (paired accessor), likewise the static pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBag {
    /// Whether a constructor with ≥1 parameter is defined. Zero-parameter
    /// constructors carry no structural signal and are treated as absent.
    pub has_param_constructor: bool,
    /// Static method and field names (indistinguishable at this granularity).
    pub static_methods_and_fields: BTreeSet<String>,
    pub static_getters: BTreeSet<String>,
    pub static_setters: BTreeSet<String>,
    pub methods: BTreeSet<String>,
    pub getters: BTreeSet<String>,
    pub setters: BTreeSet<String>,
    pub fields: BTreeSet<String>,
}

impl ClassBag {
    /// Borrow the set for a category.
    pub fn category(&self, cat: MemberCategory) -> &BTreeSet<String> {
        match cat {
            MemberCategory::StaticMethodsAndFields => &self.static_methods_and_fields,
            MemberCategory::StaticGetters => &self.static_getters,
            MemberCategory::StaticSetters => &self.static_setters,
            MemberCategory::Methods => &self.methods,
            MemberCategory::Getters => &self.getters,
            MemberCategory::Setters => &self.setters,
            MemberCategory::Fields => &self.fields,
        }
    }

    /// Mutably borrow the set for a category.
    pub fn category_mut(&mut self, cat: MemberCategory) -> &mut BTreeSet<String> {
        match cat {
            MemberCategory::StaticMethodsAndFields => &mut self.static_methods_and_fields,
            MemberCategory::StaticGetters => &mut self.static_getters,
            MemberCategory::StaticSetters => &mut self.static_setters,
            MemberCategory::Methods => &mut self.methods,
            MemberCategory::Getters => &mut self.getters,
            MemberCategory::Setters => &mut self.setters,
            MemberCategory::Fields => &mut self.fields,
        }
    }

    /// Union another bag into this one. Used to merge multiple live
    /// candidates implementing one baseline type.
    pub fn union(&mut self, other: &ClassBag) {
        self.has_param_constructor |= other.has_param_constructor;
        for cat in MemberCategory::all() {
            let names: Vec<String> = other.category(*cat).iter().cloned().collect();
            self.category_mut(*cat).extend(names);
        }
    }

    /// Total member count across all six categories (constructor flag
    /// excluded).
    pub fn member_count(&self) -> usize {
        MemberCategory::all()
            .iter()
            .map(|cat| self.category(*cat).len())
            .sum()
    }

    /// True when no category holds a member and the constructor flag is
    /// unset.
    pub fn is_empty(&self) -> bool {
        !self.has_param_constructor && self.member_count() == 0
    }
}
