//! TOML parsing for engagement files and the document index.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{DeskIndex, DocumentsFile, EngagementEntry, EngagementSpec};
use crate::write::WriteOp;
use std::path::Path;

/// Result of loading items: successfully loaded items plus any warnings
pub struct LoadResult<T> {
    pub items: Vec<T>,
    pub warnings: Vec<Diagnostic>,
}

/// Load all engagements from the engagements directory
pub fn load_engagements(config: &Config) -> Result<Vec<EngagementEntry>, Diagnostic> {
    load_engagements_with_warnings(config).map(|r| r.items)
}

/// Load all engagements, returning both items and parse warnings
pub fn load_engagements_with_warnings(
    config: &Config,
) -> Result<LoadResult<EngagementEntry>, Diagnostic> {
    let dir = config.engagements_dir();
    if !dir.exists() {
        return Ok(LoadResult {
            items: vec![],
            warnings: vec![],
        });
    }

    let mut items = Vec::new();
    let mut warnings = Vec::new();
    let entries = std::fs::read_dir(&dir).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            e.to_string(),
            dir.display().to_string(),
        )
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            match load_engagement(&path) {
                Ok(engagement) => items.push(engagement),
                Err(e) => {
                    // Record warning instead of silently skipping
                    warnings.push(Diagnostic::new(
                        DiagnosticCode::W0101EngagementParseSkipped,
                        format!("Skipped engagement (parse error): {}", e.message),
                        path.display().to_string(),
                    ));
                }
            }
        }
    }

    // Stable listing order regardless of directory iteration order
    items.sort_by(|a, b| a.meta().id.cmp(&b.meta().id));

    Ok(LoadResult { items, warnings })
}

/// Load a single engagement from TOML file
pub fn load_engagement(path: &Path) -> Result<EngagementEntry, Diagnostic> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            e.to_string(),
            path.display().to_string(),
        )
    })?;

    let spec: EngagementSpec = toml::from_str(&content).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0101EngagementSchemaInvalid,
            format!("Invalid TOML: {e}"),
            path.display().to_string(),
        )
    })?;

    Ok(EngagementEntry {
        spec,
        path: path.to_path_buf(),
    })
}

/// Write an engagement to TOML file
pub fn write_engagement(path: &Path, spec: &EngagementSpec, op: WriteOp) -> Result<(), Diagnostic> {
    let content = toml::to_string_pretty(spec).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            format!("Failed to serialize TOML: {e}"),
            path.display().to_string(),
        )
    })?;

    crate::write::write_file(path, &content, op).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            e.to_string(),
            path.display().to_string(),
        )
    })
}

/// Load the document index from desk/documents.toml.
/// Returns an empty index if the file doesn't exist.
pub fn load_documents(config: &Config) -> Result<DocumentsFile, Diagnostic> {
    let path = config.documents_path();
    if !path.exists() {
        return Ok(DocumentsFile::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            e.to_string(),
            path.display().to_string(),
        )
    })?;

    let documents: DocumentsFile = toml::from_str(&content).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0902TomlParseError,
            format!("Invalid documents.toml: {e}"),
            path.display().to_string(),
        )
    })?;

    Ok(documents)
}

/// Write the document index to desk/documents.toml
pub fn write_documents(
    config: &Config,
    documents: &DocumentsFile,
    op: WriteOp,
) -> Result<(), Diagnostic> {
    let path = config.documents_path();
    let content = toml::to_string_pretty(documents).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            format!("Failed to serialize documents: {e}"),
            path.display().to_string(),
        )
    })?;

    crate::write::write_file(&path, &content, op).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0901IoError,
            e.to_string(),
            path.display().to_string(),
        )
    })
}

/// Load the full desk index (engagements + document index)
pub fn load_desk(config: &Config) -> Result<DeskIndex, Vec<Diagnostic>> {
    let mut index = DeskIndex::default();
    let mut errors = Vec::new();

    match load_engagements(config) {
        Ok(engagements) => index.engagements = engagements,
        Err(e) => errors.push(e),
    }

    match load_documents(config) {
        Ok(docs) => index.documents = docs.documents,
        Err(e) => errors.push(e),
    }

    if errors.is_empty() {
        Ok(index)
    } else {
        Err(errors)
    }
}

/// Find an engagement by ID
pub fn find_engagement(config: &Config, id: &str) -> Result<EngagementEntry, Diagnostic> {
    let engagements = load_engagements(config)?;
    engagements
        .into_iter()
        .find(|e| e.meta().id == id)
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCode::E0102EngagementNotFound,
                format!("Engagement not found: {id}"),
                id,
            )
        })
}
