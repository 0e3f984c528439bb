//! Check/lint command implementation.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::parse::{load_documents, load_engagements_with_warnings};
use crate::scan::scan_archive;
use crate::ui;
use crate::validate::validate_desk;
use chrono::NaiveDate;

/// Validate the whole desk store, plus archive drives when configured
pub fn check_all(config: &Config, as_of: NaiveDate) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    let engagements = match load_engagements_with_warnings(config) {
        Ok(result) => {
            diagnostics.extend(result.warnings);
            result.items
        }
        Err(e) => return Ok(vec![e]),
    };

    let documents = match load_documents(config) {
        Ok(docs) => docs.documents,
        Err(e) => return Ok(vec![e]),
    };

    let index = crate::model::DeskIndex {
        engagements,
        documents,
    };

    let result = validate_desk(&index, as_of);

    ui::check_header();
    ui::check_count(result.engagement_count, "engagements");
    ui::check_count(result.stage_count, "stages");
    ui::check_count(result.action_count, "client actions");
    ui::check_count(result.document_count, "documents");

    diagnostics.extend(result.diagnostics);

    if config.archive_scan.enabled {
        let scan = scan_archive(config, &index);
        ui::check_count(scan.files_scanned, "archive files");
        diagnostics.extend(scan.diagnostics);
    }

    eprintln!();
    if diagnostics.is_empty() {
        ui::success("All checks passed");
    }

    Ok(diagnostics)
}
