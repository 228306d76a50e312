//! Report values handed to the (out-of-scope) reporting layer.

use serde::{Deserialize, Serialize};

use typedrift_core::types::drift::DriftChanges;
use typedrift_core::types::DeclarationKind;

/// Which bucket a declaration's result lands in. Precedence: an error
/// outranks drift, drift outranks warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Unchanged,
    Warned,
    Changed,
    Errored,
}

/// The result of checking one baseline declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarationReport {
    pub kind: DeclarationKind,
    pub identifier: String,
    /// Computed drift; absent when every lookup stage failed.
    pub changes: Option<DriftChanges>,
    /// Declaration-level error; fatal for this declaration only.
    pub error: Option<String>,
    pub warns: Vec<String>,
}

impl DeclarationReport {
    pub fn bucket(&self) -> Bucket {
        if self.error.is_some() {
            Bucket::Errored
        } else if self.changes.as_ref().is_some_and(|c| !c.is_clean()) {
            Bucket::Changed
        } else if !self.warns.is_empty() {
            Bucket::Warned
        } else {
            Bucket::Unchanged
        }
    }
}

/// All declaration results for one baseline file, bucketed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub unchanged: Vec<DeclarationReport>,
    pub warned: Vec<DeclarationReport>,
    pub changed: Vec<DeclarationReport>,
    pub errored: Vec<DeclarationReport>,
}

impl FileReport {
    pub fn from_reports(file: impl Into<String>, reports: Vec<DeclarationReport>) -> Self {
        let mut out = Self {
            file: file.into(),
            ..Default::default()
        };
        for report in reports {
            match report.bucket() {
                Bucket::Unchanged => out.unchanged.push(report),
                Bucket::Warned => out.warned.push(report),
                Bucket::Changed => out.changed.push(report),
                Bucket::Errored => out.errored.push(report),
            }
        }
        out
    }

    pub fn total(&self) -> usize {
        self.unchanged.len() + self.warned.len() + self.changed.len() + self.errored.len()
    }

    /// True when nothing drifted and nothing errored.
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.errored.is_empty()
    }

    /// Serialize for the reporting layer's transport.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
