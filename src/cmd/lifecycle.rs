//! Lifecycle command implementations: complete, wait, resume, submit.
//!
//! These commands only flip stored flags and stamp dates; derived statuses
//! are never written back to the store.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{ActionSpec, EngagementEntry, Fault, ItemRef, StageSpec};
use crate::parse::{find_engagement, write_engagement};
use crate::ui;
use crate::write::WriteOp;
use chrono::NaiveDate;

/// Mark an engagement or stage completed
pub fn complete(
    config: &Config,
    reference: &str,
    as_of: NaiveDate,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    let item = ItemRef::parse(reference)?;
    let mut entry = find_engagement(config, item.engagement_id())?;
    let date = as_of.format("%Y-%m-%d").to_string();

    match item {
        ItemRef::Engagement(ref id) => {
            if entry.spec.deskctl.completed {
                return Err(Diagnostic::new(
                    DiagnosticCode::E0106EngagementAlreadyCompleted,
                    format!("Engagement already completed: {id}"),
                    entry.path.display().to_string(),
                )
                .into());
            }
            entry.spec.deskctl.completed = true;
            entry.spec.deskctl.completed_on = Some(date.clone());
            // Completing a draft implies it was started
            if entry.spec.deskctl.started.is_none() {
                entry.spec.deskctl.started = Some(date.clone());
            }
            write_engagement(&entry.path, &entry.spec, op)?;
            if !op.is_preview() {
                ui::transitioned(id, "Completed", &date);
            }
        }
        ItemRef::Stage(_, no) => {
            let path = entry.path.display().to_string();
            let stage = find_stage(&mut entry, no, &path)?;
            if stage.completed {
                return Err(Diagnostic::new(
                    DiagnosticCode::E0204StageAlreadyCompleted,
                    format!("Stage already completed: {reference}"),
                    path,
                )
                .into());
            }
            stage.completed = true;
            stage.waiting_on_client = false;
            write_engagement(&entry.path, &entry.spec, op)?;
            if !op.is_preview() {
                ui::transitioned(reference, "Completed", &date);
            }
        }
        ItemRef::Action(..) => {
            anyhow::bail!("Use `deskctl submit` for client actions: {reference}");
        }
    }

    Ok(vec![])
}

/// Put a stage into waiting-on-client
pub fn wait(
    config: &Config,
    reference: &str,
    reason: Option<&str>,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    let item = ItemRef::parse(reference)?;
    let ItemRef::Stage(ref id, no) = item else {
        anyhow::bail!("Expected a stage reference (ENG-...:S<n>): {reference}");
    };

    let mut entry = find_engagement(config, id)?;
    let path = entry.path.display().to_string();
    let stage = find_stage(&mut entry, no, &path)?;

    if stage.completed {
        return Err(Diagnostic::new(
            DiagnosticCode::E0204StageAlreadyCompleted,
            format!("Cannot wait on a completed stage: {reference}"),
            path,
        )
        .into());
    }

    stage.waiting_on_client = true;
    if let Some(reason) = reason {
        stage.overdue_reason = Some(reason.to_string());
    }

    write_engagement(&entry.path, &entry.spec, op)?;
    if !op.is_preview() {
        ui::transitioned(reference, "Waiting", "waiting-on-client");
    }
    Ok(vec![])
}

/// Clear a stage's waiting-on-client flag
pub fn resume(config: &Config, reference: &str, op: WriteOp) -> anyhow::Result<Vec<Diagnostic>> {
    let item = ItemRef::parse(reference)?;
    let ItemRef::Stage(ref id, no) = item else {
        anyhow::bail!("Expected a stage reference (ENG-...:S<n>): {reference}");
    };

    let mut entry = find_engagement(config, id)?;
    let path = entry.path.display().to_string();
    let stage = find_stage(&mut entry, no, &path)?;
    stage.waiting_on_client = false;

    write_engagement(&entry.path, &entry.spec, op)?;
    if !op.is_preview() {
        ui::transitioned(reference, "Resumed", "in-progress");
    }
    Ok(vec![])
}

/// Mark a client action submitted
pub fn submit(
    config: &Config,
    reference: &str,
    fault: Option<Fault>,
    as_of: NaiveDate,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    let item = ItemRef::parse(reference)?;
    let ItemRef::Action(ref id, no) = item else {
        anyhow::bail!("Expected an action reference (ENG-...:A<n>): {reference}");
    };

    let mut entry = find_engagement(config, id)?;
    let path = entry.path.display().to_string();
    let action = find_action(&mut entry, no, &path)?;

    if action.submitted {
        return Err(Diagnostic::new(
            DiagnosticCode::E0304ActionAlreadySubmitted,
            format!("Action already submitted: {reference}"),
            path,
        )
        .into());
    }

    let date = as_of.format("%Y-%m-%d").to_string();
    action.submitted = true;
    action.submitted_on = Some(date.clone());
    if let Some(fault) = fault {
        action.fault = Some(fault);
    }

    write_engagement(&entry.path, &entry.spec, op)?;
    if !op.is_preview() {
        ui::transitioned(reference, "Submitted", &date);
    }
    Ok(vec![])
}

fn find_stage<'a>(
    entry: &'a mut EngagementEntry,
    no: u32,
    path: &str,
) -> Result<&'a mut StageSpec, Diagnostic> {
    entry
        .spec
        .stages
        .iter_mut()
        .find(|s| s.no == no)
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCode::E0201StageNotFound,
                format!("Stage not found: S{no}"),
                path.to_string(),
            )
        })
}

fn find_action<'a>(
    entry: &'a mut EngagementEntry,
    no: u32,
    path: &str,
) -> Result<&'a mut ActionSpec, Diagnostic> {
    entry
        .spec
        .actions
        .iter_mut()
        .find(|a| a.no == no)
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticCode::E0301ActionNotFound,
                format!("Action not found: A{no}"),
                path.to_string(),
            )
        })
}
