//! The declaration checker.
//!
//! Per declaration the three lookup stages are strictly sequential —
//! explicit lookup, store fast path, exhaustive search — each attempted
//! only after the previous stage fails, throws, or is absent. Across
//! declarations everything fans out concurrently over the one shared
//! bridge; results join at the end of each file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use typedrift_core::config::{CheckConfig, DeclarationConfig};
use typedrift_core::errors::{CheckError, SourceError};
use typedrift_core::runtime::bridge::TargetBridge;
use typedrift_core::runtime::candidate::{ClassCandidate, ExportValue};
use typedrift_core::types::drift::DriftChanges;
use typedrift_core::types::DeclarationKind;

use crate::candidates::extract::merged_class_bag;
use crate::candidates::fields::{default_discovery, FieldDiscovery};
use crate::declarations::members::{class_bag_from_syntax, enum_bag_from_syntax};
use crate::declarations::source::{parse_declarations, DeclarationSyntax};
use crate::matching::class::class_drift;
use crate::matching::enums::enum_drift;
use crate::reconcile::{
    class_ignores, enum_ignores, reconcile_class_baseline, reconcile_enum_baseline,
    validate_class_ignores, validate_enum_ignores,
};
use crate::search::{
    auto_find_class, auto_find_enum, auto_find_store, is_store_declaration, SearchMiss,
};

use super::report::{DeclarationReport, FileReport};

/// Checks baseline declaration files against a live target.
pub struct Checker {
    bridge: Arc<dyn TargetBridge>,
    discovery: Box<dyn FieldDiscovery>,
}

impl Checker {
    /// Create a checker with the default field-discovery strategy.
    pub fn new(bridge: Arc<dyn TargetBridge>) -> Self {
        Self {
            bridge,
            discovery: default_discovery(),
        }
    }

    /// Swap in a field-discovery strategy for another compilation idiom.
    pub fn with_field_discovery(mut self, discovery: Box<dyn FieldDiscovery>) -> Self {
        self.discovery = discovery;
        self
    }

    /// Check one declaration file on disk, with an optional TOML config
    /// next to it. IO, parse, and config failures are file-level fatal.
    pub async fn check_file(
        &self,
        source_path: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileReport, SourceError> {
        let source = std::fs::read_to_string(source_path).map_err(|e| SourceError::Io {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = match config_path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                CheckConfig::from_toml_str(&text).map_err(|e| SourceError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
            }
            None => CheckConfig::default(),
        };

        self.check_source(&source_path.to_string_lossy(), &source, &config)
            .await
    }

    /// Check every declaration in a source string. All declaration checks
    /// launch concurrently and join here; the per-file report buckets the
    /// results.
    pub async fn check_source(
        &self,
        file: &str,
        source: &str,
        config: &CheckConfig,
    ) -> Result<FileReport, SourceError> {
        let declarations = parse_declarations(source, Path::new(file))?;
        debug!(file, count = declarations.len(), "checking declarations");

        let reports = join_all(
            declarations
                .iter()
                .map(|decl| self.check_declaration(decl, config)),
        )
        .await;

        Ok(FileReport::from_reports(file, reports))
    }

    /// Check several files concurrently. Each file's outcome is
    /// independent; a file-level error never affects its siblings.
    pub async fn check_files(
        &self,
        files: &[(PathBuf, Option<PathBuf>)],
    ) -> Vec<(PathBuf, Result<FileReport, SourceError>)> {
        join_all(files.iter().map(|(source, config)| async move {
            let result = self.check_file(source, config.as_deref()).await;
            (source.clone(), result)
        }))
        .await
    }

    async fn check_declaration(
        &self,
        decl: &DeclarationSyntax,
        config: &CheckConfig,
    ) -> DeclarationReport {
        let mut warns = decl.warns.clone();
        let mut cfg = config.get(&decl.identifier);

        if let Some(kind) = cfg.kind {
            if kind != decl.kind {
                warns.push(format!(
                    "config declares kind {kind} but the source declares {}; config ignored",
                    decl.kind
                ));
                cfg = DeclarationConfig::default();
            }
        }

        match decl.kind {
            DeclarationKind::Class => self.check_class(decl, &cfg, warns).await,
            DeclarationKind::Enum => self.check_enum(decl, &cfg, warns).await,
        }
    }

    async fn check_class(
        &self,
        decl: &DeclarationSyntax,
        cfg: &DeclarationConfig,
        mut warns: Vec<String>,
    ) -> DeclarationReport {
        let extraction = class_bag_from_syntax(decl, cfg.include_optional);
        warns.extend(extraction.warns);

        let ignores = class_ignores(cfg, &mut warns);
        let baseline = reconcile_class_baseline(&extraction.bag, &ignores);

        let mut drift = None;
        let mut error = None;

        // Stage 1: explicit lookup.
        if let Some(code) = &cfg.find {
            match self.bridge.lookup(code).await {
                Ok(values) => {
                    let constructors: Vec<&ClassCandidate> = values
                        .iter()
                        .filter_map(ExportValue::as_constructor)
                        .collect();
                    if constructors.is_empty() {
                        warns.push(
                            "lookup returned nothing usable; falling back to search".to_string(),
                        );
                    } else {
                        let bag = merged_class_bag(constructors, self.discovery.as_ref());
                        drift = Some(class_drift(&baseline, &bag));
                    }
                }
                Err(e) => {
                    warn!(identifier = %decl.identifier, error = %e, "explicit lookup failed");
                    warns.push(format!("lookup failed: {e}; falling back to search"));
                }
            }
        }

        if drift.is_none() {
            match self.bridge.snapshot().await {
                Ok(snapshot) => {
                    // Stage 2: store fast path.
                    if is_store_declaration(&decl.identifier, decl.is_abstract) {
                        if let Some(hit) = auto_find_store(
                            &snapshot,
                            &decl.identifier,
                            &baseline,
                            self.discovery.as_ref(),
                        ) {
                            debug!(
                                identifier = %decl.identifier,
                                module = hit.module_id,
                                export = %hit.export,
                                "store fast path matched"
                            );
                            drift = Some(hit.drift);
                        }
                    }

                    // Stage 3: exhaustive search.
                    if drift.is_none() {
                        match auto_find_class(&snapshot, &baseline, self.discovery.as_ref()) {
                            Ok(hit) => {
                                debug!(
                                    identifier = %decl.identifier,
                                    module = hit.module_id,
                                    export = %hit.export,
                                    changed = hit.drift.changed_count,
                                    "exhaustive class search matched"
                                );
                                drift = Some(hit.drift);
                            }
                            Err(miss) => error = Some(self.miss_error(&decl.identifier, miss)),
                        }
                    }
                }
                Err(e) => {
                    warns.push(format!("module snapshot unavailable: {e}"));
                    error = Some(
                        CheckError::NotFound {
                            identifier: decl.identifier.clone(),
                        }
                        .to_string(),
                    );
                }
            }
        }

        if let Some(drift) = &drift {
            warns.extend(validate_class_ignores(&ignores, drift));
        }

        DeclarationReport {
            kind: decl.kind,
            identifier: decl.identifier.clone(),
            changes: drift.map(DriftChanges::Class),
            error,
            warns,
        }
    }

    async fn check_enum(
        &self,
        decl: &DeclarationSyntax,
        cfg: &DeclarationConfig,
        mut warns: Vec<String>,
    ) -> DeclarationReport {
        let raw_baseline = enum_bag_from_syntax(decl);
        let ignores = enum_ignores(cfg, &mut warns);
        let baseline = reconcile_enum_baseline(&raw_baseline, &ignores);
        let mapper = cfg.key_mapper.as_ref();

        let mut drift = None;
        let mut error = None;

        // Stage 1: explicit lookup.
        if let Some(code) = &cfg.find {
            match self.bridge.lookup(code).await {
                Ok(values) => match values.iter().find_map(ExportValue::as_object) {
                    Some(candidate) => {
                        let scored = enum_drift(&baseline, candidate, mapper);
                        if scored.poisoned {
                            warns.push(
                                "lookup candidate disqualified (value read threw); falling back to search"
                                    .to_string(),
                            );
                        } else {
                            drift = Some(scored);
                        }
                    }
                    None => {
                        warns.push(
                            "lookup returned nothing usable; falling back to search".to_string(),
                        );
                    }
                },
                Err(e) => {
                    warn!(identifier = %decl.identifier, error = %e, "explicit lookup failed");
                    warns.push(format!("lookup failed: {e}; falling back to search"));
                }
            }
        }

        // Stage 2 has no enum form; go straight to the exhaustive search.
        if drift.is_none() {
            match self.bridge.snapshot().await {
                Ok(snapshot) => match auto_find_enum(&snapshot, &baseline, mapper) {
                    Ok(hit) => {
                        debug!(
                            identifier = %decl.identifier,
                            module = hit.module_id,
                            export = %hit.export,
                            changed = hit.drift.changed_count,
                            "exhaustive enum search matched"
                        );
                        drift = Some(hit.drift);
                    }
                    Err(miss) => error = Some(self.miss_error(&decl.identifier, miss)),
                },
                Err(e) => {
                    warns.push(format!("module snapshot unavailable: {e}"));
                    error = Some(
                        CheckError::NotFound {
                            identifier: decl.identifier.clone(),
                        }
                        .to_string(),
                    );
                }
            }
        }

        if let Some(drift) = &drift {
            warns.extend(validate_enum_ignores(&ignores, drift));
        }

        DeclarationReport {
            kind: decl.kind,
            identifier: decl.identifier.clone(),
            changes: drift.map(DriftChanges::Enum),
            error,
            warns,
        }
    }

    fn miss_error(&self, identifier: &str, miss: SearchMiss) -> String {
        let error = match miss {
            SearchMiss::NoCandidates => CheckError::NotFound {
                identifier: identifier.to_string(),
            },
            SearchMiss::GateRejected => CheckError::NoAcceptableCandidate {
                identifier: identifier.to_string(),
            },
        };
        error.to_string()
    }
}
