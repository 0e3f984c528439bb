//! Data models for engagements, stages, client actions, and the document index.

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::naming::DriveCode;
use crate::schedule;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

// =============================================================================
// Engagement Models (TOML SSOT)
// =============================================================================

/// Engagement metadata section [deskctl]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementMeta {
    pub schema: u32,
    pub id: String,
    pub client_code: String,
    pub title: String,
    /// ISO date the engagement was started; absent while still a draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    pub deadline: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<String>,
}

/// Engagement content section [content]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngagementContent {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// One step within an engagement ([[stage]]).
///
/// Stage order in the file is the workflow order; nothing here enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpec {
    pub no: u32,
    pub name: String,
    pub owner: Party,
    pub deadline: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub waiting_on_client: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue_reason: Option<String>,
}

/// A discrete obligation placed on the client ([[action]])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSpec {
    pub no: u32,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub deadline: String,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<Fault>,
}

/// Complete engagement file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSpec {
    pub deskctl: EngagementMeta,
    #[serde(default)]
    pub content: EngagementContent,
    #[serde(default, rename = "stage", skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageSpec>,
    #[serde(default, rename = "action", skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSpec>,
}

// =============================================================================
// Status enumerations
// =============================================================================

/// Engagement lifecycle status.
///
/// `Draft` is assigned by callers while the engagement has no start date;
/// the derivation in [`crate::schedule`] never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EngagementStatus {
    Draft,
    InProgress,
    WaitingOnClient,
    Completed,
    Overdue,
}

/// Stage lifecycle status.
///
/// `NotStarted` is caller-assigned prior to stage activation, never derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StageStatus {
    NotStarted,
    InProgress,
    WaitingOnClient,
    Completed,
    Overdue,
}

/// Client action status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActionStatus {
    Pending,
    Submitted,
    Late,
}

/// Responsible party for a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Party {
    Client,
    AccountingStaff,
}

/// Kind of client action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActionKind {
    Upload,
    Confirm,
    Revise,
}

/// Fault attribution recorded when a delay occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Fault {
    Client,
    Staff,
}

// =============================================================================
// Document index (desk/documents.toml)
// =============================================================================

/// One filed document ([[document]])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub client_code: String,
    pub drive: DriveCode,
    pub cabinet_code: String,
    pub serial: u32,
    pub description: String,
    pub version: String,
    pub date: String,
    pub extension: String,
    pub filename: String,
}

impl DocumentRecord {
    /// The codec-facing descriptor for this record
    pub fn descriptor(&self) -> crate::naming::DocumentDescriptor {
        crate::naming::DocumentDescriptor {
            client_code: self.client_code.clone(),
            drive: self.drive,
            cabinet_code: self.cabinet_code.clone(),
            serial: self.serial,
            description: self.description.clone(),
            version: self.version.clone(),
            date: self.date.clone(),
            extension: self.extension.clone(),
        }
    }
}

/// Complete document index file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentsFile {
    #[serde(default, rename = "document", skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRecord>,
}

// =============================================================================
// Indexed structures for loaded data
// =============================================================================

/// Loaded engagement with its path
#[derive(Debug, Clone)]
pub struct EngagementEntry {
    pub spec: EngagementSpec,
    pub path: std::path::PathBuf,
}

impl EngagementEntry {
    /// Convenience accessor for metadata
    pub fn meta(&self) -> &EngagementMeta {
        &self.spec.deskctl
    }

    fn parse_date(&self, value: &str, code: DiagnosticCode) -> Result<NaiveDate, Diagnostic> {
        value.parse::<NaiveDate>().map_err(|_| {
            Diagnostic::new(
                code,
                format!("Invalid date: {value}"),
                self.path.display().to_string(),
            )
        })
    }

    /// Engagement deadline as a calendar date
    pub fn deadline_date(&self) -> Result<NaiveDate, Diagnostic> {
        self.parse_date(&self.meta().deadline, DiagnosticCode::E0103EngagementDateInvalid)
    }

    /// Derived engagement status for the given effective date.
    ///
    /// Status is never stored; an engagement without a start date is a draft,
    /// everything else is a pure projection of (date, deadline, completed).
    pub fn status_on(&self, as_of: NaiveDate) -> Result<EngagementStatus, Diagnostic> {
        let meta = self.meta();
        if meta.started.is_none() && !meta.completed {
            return Ok(EngagementStatus::Draft);
        }
        let deadline = self.deadline_date()?;
        Ok(schedule::engagement_status(as_of, deadline, meta.completed))
    }

    /// Derived status of one of this engagement's stages
    pub fn stage_status_on(
        &self,
        stage: &StageSpec,
        as_of: NaiveDate,
    ) -> Result<StageStatus, Diagnostic> {
        let deadline = self.parse_date(&stage.deadline, DiagnosticCode::E0202StageDateInvalid)?;
        Ok(schedule::stage_status(
            as_of,
            deadline,
            stage.completed,
            stage.waiting_on_client,
        ))
    }

    /// Derived status of one of this engagement's client actions
    pub fn action_status_on(
        &self,
        action: &ActionSpec,
        as_of: NaiveDate,
    ) -> Result<ActionStatus, Diagnostic> {
        let deadline = self.parse_date(&action.deadline, DiagnosticCode::E0302ActionDateInvalid)?;
        Ok(schedule::action_status(as_of, deadline, action.submitted))
    }
}

/// Full desk index
#[derive(Debug, Clone, Default)]
pub struct DeskIndex {
    pub engagements: Vec<EngagementEntry>,
    pub documents: Vec<DocumentRecord>,
}

impl DeskIndex {
    /// Iterate over all stages across all engagements
    pub fn iter_stages(&self) -> impl Iterator<Item = (&EngagementEntry, &StageSpec)> {
        self.engagements
            .iter()
            .flat_map(|e| e.spec.stages.iter().map(move |s| (e, s)))
    }

    /// Iterate over all client actions across all engagements
    pub fn iter_actions(&self) -> impl Iterator<Item = (&EngagementEntry, &ActionSpec)> {
        self.engagements
            .iter()
            .flat_map(|e| e.spec.actions.iter().map(move |a| (e, a)))
    }
}

// =============================================================================
// Item references (ENG-... / ENG-...:S2 / ENG-...:A3)
// =============================================================================

/// A parsed command-line reference to an engagement, stage, or action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Engagement(String),
    Stage(String, u32),
    Action(String, u32),
}

impl ItemRef {
    /// Parse a reference of the form `ENG-...`, `ENG-...:S<n>`, or `ENG-...:A<n>`
    pub fn parse(input: &str) -> Result<Self, Diagnostic> {
        let invalid = || {
            Diagnostic::new(
                DiagnosticCode::E0802InvalidRef,
                format!("Invalid reference: {input} (expected ENG-..., ENG-...:S<n>, or ENG-...:A<n>)"),
                input,
            )
        };

        match input.split_once(':') {
            None => {
                if input.starts_with("ENG-") {
                    Ok(Self::Engagement(input.to_string()))
                } else {
                    Err(invalid())
                }
            }
            Some((id, item)) => {
                if !id.starts_with("ENG-") {
                    return Err(invalid());
                }
                let no = item
                    .get(1..)
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| invalid())?;
                match item.chars().next() {
                    Some('S') => Ok(Self::Stage(id.to_string(), no)),
                    Some('A') => Ok(Self::Action(id.to_string(), no)),
                    _ => Err(invalid()),
                }
            }
        }
    }

    /// The engagement ID this reference points into
    pub fn engagement_id(&self) -> &str {
        match self {
            Self::Engagement(id) | Self::Stage(id, _) | Self::Action(id, _) => id,
        }
    }
}
