//! Archive drive filename scanning.
//!
//! Walks files under configured archive roots matching include/exclude glob
//! patterns, parses each file name against the canonical grammar, and
//! cross-checks parsed names against the document index.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::DeskIndex;
use crate::naming::parse_filename;
use globset::{Glob, GlobSetBuilder};
use std::collections::{HashMap, HashSet};
use walkdir::WalkDir;

/// Result of archive scanning
#[derive(Debug, Default)]
pub struct ScanResult {
    pub diagnostics: Vec<Diagnostic>,
    pub files_scanned: usize,
    pub names_parsed: usize,
}

/// Scan archive roots for filed documents
pub fn scan_archive(config: &Config, index: &DeskIndex) -> ScanResult {
    if !config.archive_scan.enabled {
        return ScanResult::default();
    }

    let mut result = ScanResult::default();

    // Serial triples known to the index
    let indexed: HashSet<(String, String, u32)> = index
        .documents
        .iter()
        .map(|d| (d.client_code.clone(), d.cabinet_code.clone(), d.serial))
        .collect();

    // Build include glob set
    let mut include_builder = GlobSetBuilder::new();
    for pat in &config.archive_scan.include {
        match Glob::new(pat) {
            Ok(g) => {
                include_builder.add(g);
            }
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::E0501ConfigInvalid,
                    format!("Invalid archive_scan.include glob '{}': {}", pat, e),
                    "desk/config.toml".to_string(),
                ));
                return result;
            }
        }
    }
    let include_set = match include_builder.build() {
        Ok(s) => s,
        Err(e) => {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0501ConfigInvalid,
                format!("Failed to build include glob set: {}", e),
                "desk/config.toml".to_string(),
            ));
            return result;
        }
    };

    // Build exclude glob set
    let mut exclude_builder = GlobSetBuilder::new();
    for pat in &config.archive_scan.exclude {
        match Glob::new(pat) {
            Ok(g) => {
                exclude_builder.add(g);
            }
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::E0501ConfigInvalid,
                    format!("Invalid archive_scan.exclude glob '{}': {}", pat, e),
                    "desk/config.toml".to_string(),
                ));
                return result;
            }
        }
    }
    let exclude_set = match exclude_builder.build() {
        Ok(s) => s,
        Err(e) => {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0501ConfigInvalid,
                format!("Failed to build exclude glob set: {}", e),
                "desk/config.toml".to_string(),
            ));
            return result;
        }
    };

    // Serial triples seen on disk, for collision detection across roots
    let mut seen: HashMap<(String, String, u32), String> = HashMap::new();

    for root in &config.archive_scan.roots {
        let files = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file());

        for entry in files {
            let path = entry.path();
            let match_path = path.strip_prefix(root).unwrap_or(path);

            if !include_set.is_match(match_path) || exclude_set.is_match(match_path) {
                continue;
            }

            result.files_scanned += 1;
            let name = entry.file_name().to_string_lossy().to_string();
            let path_str = path.display().to_string();

            let Some(parsed) = parse_filename(&name) else {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W0104ArchiveNameUnparsed,
                    format!("Filename does not match the naming grammar: {name}"),
                    path_str,
                ));
                continue;
            };

            result.names_parsed += 1;
            let triple = (
                parsed.client_code.clone(),
                parsed.cabinet_code.clone(),
                parsed.serial,
            );

            if let Some(other) = seen.get(&triple) {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::E0403DocumentSerialDuplicate,
                    format!(
                        "Serial {}/{}/{:03} already used by {}",
                        triple.0, triple.1, triple.2, other
                    ),
                    path_str,
                ));
                continue;
            }
            seen.insert(triple.clone(), name.clone());

            if !indexed.contains(&triple) {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W0105ArchiveNotIndexed,
                    format!("Filed document is not in the index: {name}"),
                    path_str,
                ));
            }
        }
    }

    result
}
