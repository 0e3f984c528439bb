//! Store validation rules.
//!
//! `check` runs every rule here over the loaded desk index and reports coded
//! diagnostics; nothing in this module mutates the store.

use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLevel};
use crate::model::{DeskIndex, EngagementEntry, StageStatus};
use crate::naming::generate_filename;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Client codes are 2-3 uppercase ASCII letters
pub fn is_valid_client_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Cabinet codes are one uppercase ASCII letter followed by two digits
pub fn is_valid_cabinet_code(code: &str) -> bool {
    let mut chars = code.chars();
    matches!(
        (chars.next(), chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(d1), Some(d2), None)
            if letter.is_ascii_uppercase() && d1.is_ascii_digit() && d2.is_ascii_digit()
    )
}

/// Validation result with diagnostics
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub engagement_count: usize,
    pub stage_count: usize,
    pub action_count: usize,
    pub document_count: usize,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }
}

/// Validate the entire desk store
pub fn validate_desk(index: &DeskIndex, as_of: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult {
        engagement_count: index.engagements.len(),
        stage_count: index.iter_stages().count(),
        action_count: index.iter_actions().count(),
        document_count: index.documents.len(),
        ..Default::default()
    };

    let mut ids_seen: HashMap<&str, &EngagementEntry> = HashMap::new();
    for engagement in &index.engagements {
        if let Some(first) = ids_seen.get(engagement.meta().id.as_str()) {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0105EngagementDuplicateId,
                format!(
                    "Engagement ID {} already used by {}",
                    engagement.meta().id,
                    first.path.display()
                ),
                engagement.path.display().to_string(),
            ));
        } else {
            ids_seen.insert(engagement.meta().id.as_str(), engagement);
        }

        validate_engagement(engagement, as_of, &mut result);
    }

    validate_documents(index, &mut result);

    result
}

fn validate_engagement(
    engagement: &EngagementEntry,
    as_of: NaiveDate,
    result: &mut ValidationResult,
) {
    let meta = engagement.meta();
    let file = engagement.path.display().to_string();

    if !is_valid_client_code(&meta.client_code) {
        result.diagnostics.push(Diagnostic::new(
            DiagnosticCode::E0104EngagementClientCodeInvalid,
            format!(
                "Invalid client code: {} (expected 2-3 uppercase letters)",
                meta.client_code
            ),
            file.clone(),
        ));
    }

    check_date(&meta.deadline, DiagnosticCode::E0103EngagementDateInvalid, &file, result);
    if let Some(started) = &meta.started {
        check_date(started, DiagnosticCode::E0103EngagementDateInvalid, &file, result);
    }
    if let Some(completed_on) = &meta.completed_on {
        check_date(completed_on, DiagnosticCode::E0103EngagementDateInvalid, &file, result);
    }

    let mut stage_nos = HashMap::new();
    for stage in &engagement.spec.stages {
        if stage_nos.insert(stage.no, ()).is_some() {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0203StageDuplicateNo,
                format!("Duplicate stage number: {}", stage.no),
                file.clone(),
            ));
        }
        check_date(&stage.deadline, DiagnosticCode::E0202StageDateInvalid, &file, result);

        // Derived-overdue stages should carry an explanation for the client
        if let Ok(status) = engagement.stage_status_on(stage, as_of) {
            if status == StageStatus::Overdue && stage.overdue_reason.is_none() {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W0102OverdueMissingReason,
                    format!("Stage {} ({}) is overdue without a reason", stage.no, stage.name),
                    file.clone(),
                ));
            }
        }
    }

    let mut action_nos = HashMap::new();
    for action in &engagement.spec.actions {
        if action_nos.insert(action.no, ()).is_some() {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0303ActionDuplicateNo,
                format!("Duplicate action number: {}", action.no),
                file.clone(),
            ));
        }
        check_date(&action.deadline, DiagnosticCode::E0302ActionDateInvalid, &file, result);

        if let Some(submitted_on) = &action.submitted_on {
            check_date(submitted_on, DiagnosticCode::E0302ActionDateInvalid, &file, result);

            // Late submissions should record who caused the delay
            let late = submitted_on
                .parse::<NaiveDate>()
                .ok()
                .zip(action.deadline.parse::<NaiveDate>().ok())
                .is_some_and(|(on, deadline)| on > deadline);
            if late && action.fault.is_none() {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::W0103LateActionMissingFault,
                    format!("Action {} was submitted late without fault attribution", action.no),
                    file.clone(),
                ));
            }
        }
    }
}

fn validate_documents(index: &DeskIndex, result: &mut ValidationResult) {
    let mut serials: HashMap<(String, String, u32), String> = HashMap::new();

    for doc in &index.documents {
        let file = "desk/documents.toml".to_string();

        if !is_valid_client_code(&doc.client_code) {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0405DocumentCodeInvalid,
                format!("Invalid client code: {}", doc.client_code),
                file.clone(),
            ));
            continue;
        }
        if !is_valid_cabinet_code(&doc.cabinet_code) {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0405DocumentCodeInvalid,
                format!("Invalid cabinet code: {}", doc.cabinet_code),
                file.clone(),
            ));
            continue;
        }

        check_date(&doc.date, DiagnosticCode::E0406DocumentDateInvalid, &file, result);

        let triple = (doc.client_code.clone(), doc.cabinet_code.clone(), doc.serial);
        if let Some(other) = serials.get(&triple) {
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::E0403DocumentSerialDuplicate,
                format!(
                    "Serial {}/{}/{:03} already used by {}",
                    triple.0, triple.1, triple.2, other
                ),
                file.clone(),
            ));
        } else {
            serials.insert(triple, doc.filename.clone());
        }

        // Stored filenames must be the canonical encoding of their record
        match generate_filename(&doc.descriptor()) {
            Ok(canonical) if canonical == doc.filename => {}
            Ok(canonical) => {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::E0404DocumentFilenameInvalid,
                    format!(
                        "Stored filename {} is not canonical (expected {})",
                        doc.filename, canonical
                    ),
                    file,
                ));
            }
            Err(e) => {
                result.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::E0402DocumentSerialOverflow,
                    e.to_string(),
                    file,
                ));
            }
        }
    }
}

fn check_date(value: &str, code: DiagnosticCode, file: &str, result: &mut ValidationResult) {
    if value.parse::<NaiveDate>().is_err() {
        result.diagnostics.push(Diagnostic::new(
            code,
            format!("Invalid date: {value}"),
            file.to_string(),
        ));
    }
}
