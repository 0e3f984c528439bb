//! Deadline and status derivation.
//!
//! Every function here is a pure projection of its arguments: no clock reads,
//! no stored state. The effective "today" is resolved once at the top of the
//! CLI and passed down.

use crate::model::{ActionStatus, EngagementStatus, StageStatus};
use chrono::NaiveDate;

/// Derive the status of an engagement.
///
/// Completion wins unconditionally; otherwise a date strictly past the
/// deadline is overdue. `Draft` and `WaitingOnClient` are caller-assigned
/// value-space members this function never returns.
pub fn engagement_status(
    today: NaiveDate,
    deadline: NaiveDate,
    completed: bool,
) -> EngagementStatus {
    if completed {
        EngagementStatus::Completed
    } else if today > deadline {
        EngagementStatus::Overdue
    } else {
        EngagementStatus::InProgress
    }
}

/// Derive the status of a stage.
///
/// Precedence, strictly in this order: completed, waiting on client, date
/// comparison. `NotStarted` is never derived here.
pub fn stage_status(
    today: NaiveDate,
    deadline: NaiveDate,
    completed: bool,
    waiting_on_client: bool,
) -> StageStatus {
    if completed {
        StageStatus::Completed
    } else if waiting_on_client {
        StageStatus::WaitingOnClient
    } else if today > deadline {
        StageStatus::Overdue
    } else {
        StageStatus::InProgress
    }
}

/// Derive the status of a client action
pub fn action_status(today: NaiveDate, deadline: NaiveDate, submitted: bool) -> ActionStatus {
    if submitted {
        ActionStatus::Submitted
    } else if today > deadline {
        ActionStatus::Late
    } else {
        ActionStatus::Pending
    }
}

/// Signed whole days between `on` and `deadline`.
///
/// Positive means days remaining, negative days overdue, zero due today.
/// Calendar-day granularity: the day the deadline falls on counts as 0.
pub fn days_until(deadline: NaiveDate, on: NaiveDate) -> i64 {
    (deadline - on).num_days()
}

/// Days overdue, never negative. Complementary to [`days_until`]:
/// `days_overdue(d, on) == max(0, -days_until(d, on))`.
pub fn days_overdue(deadline: NaiveDate, on: NaiveDate) -> i64 {
    (-days_until(deadline, on)).max(0)
}

// =============================================================================
// Display mapping
// =============================================================================

/// Opaque badge color key consumed by the UI layer.
///
/// The engine owns the status → tone mapping; styling belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Positive,
    Active,
    Waiting,
    Alert,
    Muted,
    Neutral,
}

/// Display label and badge tone for a status value
pub trait StatusDisplay {
    fn label(&self) -> &'static str;
    fn tone(&self) -> BadgeTone;
}

impl StatusDisplay for EngagementStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In progress",
            Self::WaitingOnClient => "Waiting on client",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Draft => BadgeTone::Muted,
            Self::InProgress => BadgeTone::Active,
            Self::WaitingOnClient => BadgeTone::Waiting,
            Self::Completed => BadgeTone::Positive,
            Self::Overdue => BadgeTone::Alert,
        }
    }
}

impl StatusDisplay for StageStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::WaitingOnClient => "Waiting on client",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::NotStarted => BadgeTone::Muted,
            Self::InProgress => BadgeTone::Active,
            Self::WaitingOnClient => BadgeTone::Waiting,
            Self::Completed => BadgeTone::Positive,
            Self::Overdue => BadgeTone::Alert,
        }
    }
}

impl StatusDisplay for ActionStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Late => "Late",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Pending => BadgeTone::Active,
            Self::Submitted => BadgeTone::Positive,
            Self::Late => BadgeTone::Alert,
        }
    }
}

/// Badge tone and label for a status string of unknown provenance.
///
/// Total over arbitrary input: anything unmapped falls back to a neutral
/// tone and an "Unknown" label instead of failing. Display paths favor
/// availability over strictness.
pub fn badge_for_str(status: &str) -> (BadgeTone, &'static str) {
    match status {
        "draft" => (BadgeTone::Muted, "Draft"),
        "not-started" => (BadgeTone::Muted, "Not started"),
        "in-progress" => (BadgeTone::Active, "In progress"),
        "waiting-on-client" => (BadgeTone::Waiting, "Waiting on client"),
        "completed" => (BadgeTone::Positive, "Completed"),
        "overdue" => (BadgeTone::Alert, "Overdue"),
        "pending" => (BadgeTone::Active, "Pending"),
        "submitted" => (BadgeTone::Positive, "Submitted"),
        "late" => (BadgeTone::Alert, "Late"),
        _ => (BadgeTone::Neutral, "Unknown"),
    }
}
