//! Due command implementation: the cross-engagement deadline report.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::model::{ActionStatus, EngagementStatus, StageStatus};
use crate::parse::load_desk;
use crate::schedule::{self, StatusDisplay};
use crate::ui::{stdout_supports_color, tone_color};
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};

/// One row of the deadline report
struct DueRow {
    reference: String,
    what: String,
    label: &'static str,
    tone: crate::schedule::BadgeTone,
    deadline: NaiveDate,
    days: i64,
}

/// Show upcoming and overdue deadlines across the whole desk.
///
/// Completed/submitted items are excluded; overdue rows are always shown
/// regardless of the `--within` window.
pub fn due(
    config: &Config,
    within: Option<i64>,
    as_of: NaiveDate,
) -> anyhow::Result<Vec<Diagnostic>> {
    let index = match load_desk(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };

    let mut diagnostics = Vec::new();
    let mut rows: Vec<DueRow> = Vec::new();

    for engagement in &index.engagements {
        let meta = engagement.meta();
        match engagement.status_on(as_of) {
            Ok(EngagementStatus::Completed | EngagementStatus::Draft) => {}
            Ok(status) => {
                if let Ok(deadline) = engagement.deadline_date() {
                    rows.push(DueRow {
                        reference: meta.id.clone(),
                        what: meta.title.clone(),
                        label: status.label(),
                        tone: status.tone(),
                        deadline,
                        days: schedule::days_until(deadline, as_of),
                    });
                }
            }
            Err(d) => diagnostics.push(d),
        }

        for stage in &engagement.spec.stages {
            match engagement.stage_status_on(stage, as_of) {
                Ok(StageStatus::Completed) => {}
                Ok(status) => {
                    if let Ok(deadline) = stage.deadline.parse::<NaiveDate>() {
                        rows.push(DueRow {
                            reference: format!("{}:S{}", meta.id, stage.no),
                            what: stage.name.clone(),
                            label: status.label(),
                            tone: status.tone(),
                            deadline,
                            days: schedule::days_until(deadline, as_of),
                        });
                    }
                }
                Err(d) => diagnostics.push(d),
            }
        }

        for action in &engagement.spec.actions {
            match engagement.action_status_on(action, as_of) {
                Ok(ActionStatus::Submitted) => {}
                Ok(status) => {
                    if let Ok(deadline) = action.deadline.parse::<NaiveDate>() {
                        let what = action
                            .document
                            .clone()
                            .unwrap_or_else(|| action.kind.as_ref().to_string());
                        rows.push(DueRow {
                            reference: format!("{}:A{}", meta.id, action.no),
                            what,
                            label: status.label(),
                            tone: status.tone(),
                            deadline,
                            days: schedule::days_until(deadline, as_of),
                        });
                    }
                }
                Err(d) => diagnostics.push(d),
            }
        }
    }

    // Overdue rows stay in view even with a window
    if let Some(window) = within {
        rows.retain(|r| r.days <= window);
    }

    rows.sort_by(|a, b| a.days.cmp(&b.days).then_with(|| a.reference.cmp(&b.reference)));

    if rows.is_empty() {
        println!("Nothing due.");
        return Ok(diagnostics);
    }

    let colors = stdout_supports_color();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["Reference", "What", "Status", "Deadline", "Days"]
                .iter()
                .map(|h| {
                    if colors {
                        Cell::new(h).add_attribute(Attribute::Bold)
                    } else {
                        Cell::new(h)
                    }
                })
                .collect::<Vec<_>>(),
        );

    for row in &rows {
        let days = if row.days < 0 {
            format!("{} over", -row.days)
        } else {
            row.days.to_string()
        };
        let status = if colors {
            Cell::new(row.label).fg(tone_color(row.tone))
        } else {
            Cell::new(row.label)
        };
        table.add_row(vec![
            Cell::new(&row.reference),
            Cell::new(&row.what),
            status,
            Cell::new(row.deadline.format("%Y-%m-%d").to_string()),
            Cell::new(days),
        ]);
    }

    println!("{table}");
    Ok(diagnostics)
}
