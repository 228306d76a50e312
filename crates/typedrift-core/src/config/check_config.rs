//! Per-declaration check configuration, authored in TOML.
//!
//! One table per declaration identifier:
//!
//! ```toml
//! [ChannelRecord]
//! kind = "class"
//! find = "findByTemplateProps('guild_id','isThread')"
//! ignored_additions = { methods = ["isForumPost"] }
//! ignored_removals = { fields = true }
//!
//! [MessageFlags]
//! kind = "enum"
//! key_mapper = { strip_prefix = "FLAG_" }
//! ignored_removals = { SOURCE_MESSAGE_DELETED = 8192 }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::member_bag::EnumValue;
use crate::types::DeclarationKind;

/// Declarative key renaming for enum candidates. Applied to every
/// candidate key before comparison: the prefix strip first, then the
/// explicit rename table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyMapper {
    pub strip_prefix: Option<String>,
    pub rename: BTreeMap<String, String>,
}

impl KeyMapper {
    pub fn apply(&self, key: &str) -> String {
        let stripped = match &self.strip_prefix {
            Some(prefix) => key.strip_prefix(prefix.as_str()).unwrap_or(key),
            None => key,
        };
        match self.rename.get(stripped) {
            Some(renamed) => renamed.clone(),
            None => stripped.to_string(),
        }
    }
}

/// Ignore shape for one class category: the whole category, or a list of
/// member names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryIgnore {
    /// `true` — the entire category. (`false` is accepted and means the
    /// entry is inert.)
    Entire(bool),
    /// An explicit member-name list.
    Names(Vec<String>),
}

/// One declared exception set. Class configs map category names to
/// [`CategoryIgnore`]; enum configs map member keys to their values;
/// a bare `true` covers the entire bag (enums only — meaningful for
/// removals).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IgnoreSet {
    Everything(bool),
    Categories(BTreeMap<String, CategoryIgnore>),
    Entries(BTreeMap<String, EnumValue>),
}

/// Per-declaration configuration, all fields optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclarationConfig {
    /// Discriminator checked against the parsed declaration. On mismatch
    /// the whole config degrades to defaults with a warning.
    pub kind: Option<DeclarationKind>,
    /// Direct-lookup procedure, handed verbatim to the bridge.
    pub find: Option<String>,
    /// Key renaming, enums only.
    pub key_mapper: Option<KeyMapper>,
    /// Include optional members when extracting the baseline bag
    /// (classes only).
    pub include_optional: bool,
    /// Members expected to exist in the candidate but absent from the
    /// baseline text.
    pub ignored_additions: Option<IgnoreSet>,
    /// Members expected to have disappeared from the candidate.
    pub ignored_removals: Option<IgnoreSet>,
}

/// All declaration configs for one baseline file, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CheckConfig {
    pub declarations: BTreeMap<String, DeclarationConfig>,
}

impl CheckConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Config for one declaration; defaults when none is authored.
    pub fn get(&self, identifier: &str) -> DeclarationConfig {
        self.declarations
            .get(identifier)
            .cloned()
            .unwrap_or_default()
    }
}
