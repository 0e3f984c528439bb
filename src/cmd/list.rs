//! List command implementation.

use crate::cmd::{ListTarget, OutputFormat};
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::model::DeskIndex;
use crate::naming::CABINET_MAPPINGS;
use crate::parse::load_desk;
use crate::schedule::{self, badge_for_str};
use crate::ui::{stdout_supports_color, tone_color};
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

/// Check if stdout supports colors (delegates to centralized ui module)
fn use_colors() -> bool {
    stdout_supports_color()
}

/// Create a cell with optional color
fn cell(text: &str) -> Cell {
    Cell::new(text)
}

/// Create an ID cell (cyan, bold when colors enabled)
fn id_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text)
            .fg(comfy_table::Color::Cyan)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// Create a status cell colored by badge tone
fn status_cell(status: &str) -> Cell {
    if use_colors() {
        let (tone, _) = badge_for_str(status);
        Cell::new(status).fg(tone_color(tone))
    } else {
        Cell::new(status)
    }
}

/// Create a header cell (bold when colors enabled)
fn header_cell(text: &str) -> Cell {
    if use_colors() {
        Cell::new(text).add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

/// List desk records
pub fn list(
    config: &Config,
    target: ListTarget,
    filter: Option<&str>,
    limit: Option<usize>,
    output: OutputFormat,
    as_of: NaiveDate,
) -> anyhow::Result<Vec<Diagnostic>> {
    // The cabinet table is static reference data; no store needed
    if matches!(target, ListTarget::Cabinets) {
        list_cabinets(filter, limit, output);
        return Ok(vec![]);
    }

    let index = match load_desk(config) {
        Ok(idx) => idx,
        Err(diags) => return Ok(diags),
    };

    let mut diagnostics = Vec::new();
    match target {
        ListTarget::Engagements => list_engagements(&index, filter, limit, output, as_of, &mut diagnostics),
        ListTarget::Stages => list_stages(&index, filter, limit, output, as_of, &mut diagnostics),
        ListTarget::Actions => list_actions(&index, filter, limit, output, as_of, &mut diagnostics),
        ListTarget::Documents => list_documents(&index, filter, limit, output),
        ListTarget::Cabinets => unreachable!("handled above"),
    }

    Ok(diagnostics)
}

/// Output a list of items in the specified format
fn output_list<T: Serialize>(
    items: &[T],
    headers: &[&str],
    format: OutputFormat,
    to_row: impl Fn(&T) -> Vec<String>,
) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Plain => {
            for item in items {
                let row = to_row(item);
                // Plain output: tab-separated values
                println!("{}", row.join("\t"));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());

            for item in items {
                let row = to_row(item);
                table.add_row(
                    row.iter()
                        .enumerate()
                        .map(|(i, v)| {
                            // First column is ID (cyan), status columns get tone colors
                            if i == 0 {
                                id_cell(v)
                            } else if headers.get(i).is_some_and(|h| *h == "Status") {
                                status_cell(v)
                            } else {
                                cell(v)
                            }
                        })
                        .collect::<Vec<_>>(),
                );
            }

            println!("{table}");
        }
    }
}

/// Day count shown next to a deadline: remaining, overdue, or blank once done
fn days_column(deadline: &str, as_of: NaiveDate, done: bool) -> String {
    if done {
        return "-".to_string();
    }
    match deadline.parse::<NaiveDate>() {
        Ok(date) => {
            let days = schedule::days_until(date, as_of);
            if days < 0 {
                format!("{} over", -days)
            } else {
                days.to_string()
            }
        }
        Err(_) => "?".to_string(),
    }
}

/// Serializable engagement summary for JSON output
#[derive(Serialize)]
struct EngagementSummary {
    id: String,
    client: String,
    status: String,
    deadline: String,
    days: String,
    title: String,
}

fn list_engagements(
    index: &DeskIndex,
    filter: Option<&str>,
    limit: Option<usize>,
    output: OutputFormat,
    as_of: NaiveDate,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut summaries = Vec::new();
    for engagement in &index.engagements {
        let meta = engagement.meta();
        let status = match engagement.status_on(as_of) {
            Ok(s) => s,
            Err(d) => {
                diagnostics.push(d);
                continue;
            }
        };
        summaries.push(EngagementSummary {
            id: meta.id.clone(),
            client: meta.client_code.clone(),
            status: status.as_ref().to_string(),
            deadline: meta.deadline.clone(),
            days: days_column(&meta.deadline, as_of, meta.completed),
            title: meta.title.clone(),
        });
    }

    if let Some(f) = filter {
        summaries.retain(|s| s.status == f || s.client == f || s.id.contains(f));
    }

    summaries.sort_by(|a, b| a.id.cmp(&b.id));
    if let Some(n) = limit {
        summaries.truncate(n);
    }

    output_list(
        &summaries,
        &["Engagement", "Client", "Status", "Deadline", "Days", "Title"],
        output,
        |s| {
            vec![
                s.id.clone(),
                s.client.clone(),
                s.status.clone(),
                s.deadline.clone(),
                s.days.clone(),
                s.title.clone(),
            ]
        },
    );
}

/// Serializable stage summary for JSON output
#[derive(Serialize)]
struct StageSummary {
    reference: String,
    name: String,
    owner: String,
    status: String,
    deadline: String,
    days: String,
}

fn list_stages(
    index: &DeskIndex,
    filter: Option<&str>,
    limit: Option<usize>,
    output: OutputFormat,
    as_of: NaiveDate,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut summaries = Vec::new();
    for (engagement, stage) in index.iter_stages() {
        let status = match engagement.stage_status_on(stage, as_of) {
            Ok(s) => s,
            Err(d) => {
                diagnostics.push(d);
                continue;
            }
        };
        summaries.push(StageSummary {
            reference: format!("{}:S{}", engagement.meta().id, stage.no),
            name: stage.name.clone(),
            owner: stage.owner.as_ref().to_string(),
            status: status.as_ref().to_string(),
            deadline: stage.deadline.clone(),
            days: days_column(&stage.deadline, as_of, stage.completed),
        });
    }

    if let Some(f) = filter {
        summaries.retain(|s| s.status == f || s.owner == f || s.reference.contains(f));
    }

    summaries.sort_by(|a, b| a.reference.cmp(&b.reference));
    if let Some(n) = limit {
        summaries.truncate(n);
    }

    output_list(
        &summaries,
        &["Stage", "Name", "Owner", "Status", "Deadline", "Days"],
        output,
        |s| {
            vec![
                s.reference.clone(),
                s.name.clone(),
                s.owner.clone(),
                s.status.clone(),
                s.deadline.clone(),
                s.days.clone(),
            ]
        },
    );
}

/// Serializable action summary for JSON output
#[derive(Serialize)]
struct ActionSummary {
    reference: String,
    kind: String,
    document: String,
    status: String,
    deadline: String,
    days: String,
}

fn list_actions(
    index: &DeskIndex,
    filter: Option<&str>,
    limit: Option<usize>,
    output: OutputFormat,
    as_of: NaiveDate,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut summaries = Vec::new();
    for (engagement, action) in index.iter_actions() {
        let status = match engagement.action_status_on(action, as_of) {
            Ok(s) => s,
            Err(d) => {
                diagnostics.push(d);
                continue;
            }
        };
        summaries.push(ActionSummary {
            reference: format!("{}:A{}", engagement.meta().id, action.no),
            kind: action.kind.as_ref().to_string(),
            document: action.document.clone().unwrap_or_default(),
            status: status.as_ref().to_string(),
            deadline: action.deadline.clone(),
            days: days_column(&action.deadline, as_of, action.submitted),
        });
    }

    if let Some(f) = filter {
        summaries.retain(|s| s.status == f || s.kind == f || s.reference.contains(f));
    }

    summaries.sort_by(|a, b| a.reference.cmp(&b.reference));
    if let Some(n) = limit {
        summaries.truncate(n);
    }

    output_list(
        &summaries,
        &["Action", "Kind", "Document", "Status", "Deadline", "Days"],
        output,
        |s| {
            vec![
                s.reference.clone(),
                s.kind.clone(),
                s.document.clone(),
                s.status.clone(),
                s.deadline.clone(),
                s.days.clone(),
            ]
        },
    );
}

/// Serializable document summary for JSON output
#[derive(Serialize)]
struct DocumentSummary {
    filename: String,
    client: String,
    cabinet: String,
    serial: u32,
    date: String,
}

fn list_documents(
    index: &DeskIndex,
    filter: Option<&str>,
    limit: Option<usize>,
    output: OutputFormat,
) {
    let mut summaries: Vec<DocumentSummary> = index
        .documents
        .iter()
        .map(|doc| DocumentSummary {
            filename: doc.filename.clone(),
            client: doc.client_code.clone(),
            cabinet: doc.cabinet_code.clone(),
            serial: doc.serial,
            date: doc.date.clone(),
        })
        .collect();

    if let Some(f) = filter {
        summaries.retain(|s| s.client == f || s.cabinet == f || s.filename.contains(f));
    }

    summaries.sort_by(|a, b| a.filename.cmp(&b.filename));
    if let Some(n) = limit {
        summaries.truncate(n);
    }

    output_list(
        &summaries,
        &["Filename", "Client", "Cabinet", "Serial", "Date"],
        output,
        |s| {
            vec![
                s.filename.clone(),
                s.client.clone(),
                s.cabinet.clone(),
                format!("{:03}", s.serial),
                s.date.clone(),
            ]
        },
    );
}

/// Serializable cabinet summary for JSON output
#[derive(Serialize)]
struct CabinetSummary {
    key: String,
    display: String,
    cabinet: String,
    drive: String,
    description: String,
}

fn list_cabinets(filter: Option<&str>, limit: Option<usize>, output: OutputFormat) {
    let mut summaries: Vec<CabinetSummary> = CABINET_MAPPINGS
        .iter()
        .map(|m| CabinetSummary {
            key: m.key.to_string(),
            display: m.display.to_string(),
            cabinet: m.cabinet_code.to_string(),
            drive: m.drive.to_string(),
            description: m.description.to_string(),
        })
        .collect();

    if let Some(f) = filter {
        summaries.retain(|s| s.key.contains(f) || s.cabinet == f || s.drive == f);
    }

    // Table order is the filing-plan order; no sort
    if let Some(n) = limit {
        summaries.truncate(n);
    }

    output_list(
        &summaries,
        &["Type", "Display", "Cabinet", "Drive", "Description"],
        output,
        |s| {
            vec![
                s.key.clone(),
                s.display.clone(),
                s.cabinet.clone(),
                s.drive.clone(),
                s.description.clone(),
            ]
        },
    );
}
