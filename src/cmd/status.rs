//! Status command implementation.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::model::{ActionStatus, EngagementStatus, StageStatus};
use crate::parse::load_desk;
use crate::schedule::StatusDisplay;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Show summary counts per derived status
pub fn show_status(config: &Config, as_of: NaiveDate) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_desk(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };

    let mut diagnostics = Vec::new();

    // Engagement summary
    println!("=== Engagements ===\n");

    let mut by_status: HashMap<EngagementStatus, usize> = HashMap::new();
    for engagement in &index.engagements {
        match engagement.status_on(as_of) {
            Ok(status) => *by_status.entry(status).or_insert(0) += 1,
            Err(d) => diagnostics.push(d),
        }
    }

    for status in [
        EngagementStatus::Draft,
        EngagementStatus::InProgress,
        EngagementStatus::WaitingOnClient,
        EngagementStatus::Completed,
        EngagementStatus::Overdue,
    ] {
        let count = by_status.get(&status).copied().unwrap_or(0);
        if count > 0 {
            println!("    {:18}: {}", status.label(), count);
        }
    }

    println!("  ----------");
    println!("  Total:              {}\n", index.engagements.len());

    // Stage summary
    println!("=== Stages ===\n");

    let mut stage_by_status: HashMap<StageStatus, usize> = HashMap::new();
    let mut total_stages = 0;

    for (engagement, stage) in index.iter_stages() {
        total_stages += 1;
        match engagement.stage_status_on(stage, as_of) {
            Ok(status) => *stage_by_status.entry(status).or_insert(0) += 1,
            Err(d) => diagnostics.push(d),
        }
    }

    for status in [
        StageStatus::NotStarted,
        StageStatus::InProgress,
        StageStatus::WaitingOnClient,
        StageStatus::Completed,
        StageStatus::Overdue,
    ] {
        let count = stage_by_status.get(&status).copied().unwrap_or(0);
        if count > 0 {
            println!("    {:18}: {}", status.label(), count);
        }
    }

    println!("  ----------");
    println!("  Total:              {}\n", total_stages);

    // Client action summary
    println!("=== Client actions ===\n");

    let mut action_by_status: HashMap<ActionStatus, usize> = HashMap::new();
    let mut total_actions = 0;

    for (engagement, action) in index.iter_actions() {
        total_actions += 1;
        match engagement.action_status_on(action, as_of) {
            Ok(status) => *action_by_status.entry(status).or_insert(0) += 1,
            Err(d) => diagnostics.push(d),
        }
    }

    for status in [
        ActionStatus::Pending,
        ActionStatus::Submitted,
        ActionStatus::Late,
    ] {
        let count = action_by_status.get(&status).copied().unwrap_or(0);
        if count > 0 {
            println!("    {:18}: {}", status.label(), count);
        }
    }

    println!("  ----------");
    println!("  Total:              {}\n", total_actions);

    // Document summary
    println!("=== Documents ===\n");
    println!("  Indexed:            {}", index.documents.len());

    Ok(diagnostics)
}
