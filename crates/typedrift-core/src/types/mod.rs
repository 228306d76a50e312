//! Core data types: member bags, drift results, collection aliases.

pub mod collections;
pub mod drift;
pub mod member_bag;

use serde::{Deserialize, Serialize};

/// What a baseline declaration is — checked against the config's
/// discriminator and used to pick the matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Enum,
}

impl DeclarationKind {
    /// Kind name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Enum => "enum",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
