//! Status/deadline engine tests - pure derivation properties.

use chrono::NaiveDate;
use deskctl::model::{ActionStatus, EngagementStatus, StageStatus};
use deskctl::schedule::{
    BadgeTone, StatusDisplay, action_status, badge_for_str, days_overdue, days_until,
    engagement_status, stage_status,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_completed_engagement_wins_over_any_date() {
    let deadline = d(2026, 3, 1);
    for today in [d(2025, 1, 1), d(2026, 3, 1), d(2030, 12, 31)] {
        assert_eq!(
            engagement_status(today, deadline, true),
            EngagementStatus::Completed
        );
    }
}

#[test]
fn test_engagement_overdue_strictly_after_deadline() {
    let deadline = d(2026, 3, 1);
    assert_eq!(
        engagement_status(d(2026, 3, 2), deadline, false),
        EngagementStatus::Overdue
    );
    // The deadline day itself is still in progress
    assert_eq!(
        engagement_status(d(2026, 3, 1), deadline, false),
        EngagementStatus::InProgress
    );
    assert_eq!(
        engagement_status(d(2026, 2, 28), deadline, false),
        EngagementStatus::InProgress
    );
}

#[test]
fn test_engagement_derivation_never_produces_draft() {
    // Draft is caller-assigned; exhaust the flag/date combinations
    let deadline = d(2026, 3, 1);
    for today in [d(2026, 2, 1), d(2026, 3, 1), d(2026, 4, 1)] {
        for completed in [false, true] {
            assert_ne!(
                engagement_status(today, deadline, completed),
                EngagementStatus::Draft
            );
        }
    }
}

#[test]
fn test_stage_precedence_completed_beats_waiting_and_date() {
    // Overdue deadline and waiting flag set: completed still wins
    assert_eq!(
        stage_status(d(2026, 3, 2), d(2026, 3, 1), true, true),
        StageStatus::Completed
    );
}

#[test]
fn test_stage_waiting_beats_date_comparison() {
    // Past deadline but waiting on client
    assert_eq!(
        stage_status(d(2026, 3, 2), d(2026, 3, 1), false, true),
        StageStatus::WaitingOnClient
    );
    // Future deadline, waiting flag set
    assert_eq!(
        stage_status(d(2026, 2, 1), d(2026, 3, 1), false, true),
        StageStatus::WaitingOnClient
    );
}

#[test]
fn test_stage_date_comparison_when_flags_clear() {
    assert_eq!(
        stage_status(d(2026, 3, 2), d(2026, 3, 1), false, false),
        StageStatus::Overdue
    );
    assert_eq!(
        stage_status(d(2026, 3, 1), d(2026, 3, 1), false, false),
        StageStatus::InProgress
    );
}

#[test]
fn test_action_status_truth_table() {
    let yesterday = d(2026, 3, 1);
    let today = d(2026, 3, 2);
    let tomorrow = d(2026, 3, 3);

    assert_eq!(action_status(today, yesterday, false), ActionStatus::Late);
    assert_eq!(action_status(today, tomorrow, false), ActionStatus::Pending);
    assert_eq!(action_status(today, yesterday, true), ActionStatus::Submitted);
    // Due today is still pending
    assert_eq!(action_status(today, today, false), ActionStatus::Pending);
}

#[test]
fn test_days_until_sign_convention() {
    let deadline = d(2026, 3, 10);
    assert_eq!(days_until(deadline, d(2026, 3, 5)), 5);
    assert_eq!(days_until(deadline, d(2026, 3, 10)), 0);
    assert_eq!(days_until(deadline, d(2026, 3, 12)), -2);
}

#[test]
fn test_days_until_crosses_month_and_year_boundaries() {
    assert_eq!(days_until(d(2026, 3, 1), d(2026, 2, 27)), 2);
    assert_eq!(days_until(d(2027, 1, 1), d(2026, 12, 31)), 1);
}

#[test]
fn test_days_overdue_complements_days_until() {
    let deadline = d(2026, 3, 10);
    for on in [d(2026, 3, 1), d(2026, 3, 10), d(2026, 3, 15), d(2027, 1, 1)] {
        let until = days_until(deadline, on);
        assert_eq!(days_overdue(deadline, on), (-until).max(0));
        assert!(days_overdue(deadline, on) >= 0);
    }
}

#[test]
fn test_status_display_is_total_per_enum() {
    for status in [
        EngagementStatus::Draft,
        EngagementStatus::InProgress,
        EngagementStatus::WaitingOnClient,
        EngagementStatus::Completed,
        EngagementStatus::Overdue,
    ] {
        assert!(!status.label().is_empty());
    }
    for status in [
        StageStatus::NotStarted,
        StageStatus::InProgress,
        StageStatus::WaitingOnClient,
        StageStatus::Completed,
        StageStatus::Overdue,
    ] {
        assert!(!status.label().is_empty());
    }
    for status in [
        ActionStatus::Pending,
        ActionStatus::Submitted,
        ActionStatus::Late,
    ] {
        assert!(!status.label().is_empty());
    }
}

#[test]
fn test_badge_for_str_known_values() {
    assert_eq!(badge_for_str("completed"), (BadgeTone::Positive, "Completed"));
    assert_eq!(badge_for_str("overdue"), (BadgeTone::Alert, "Overdue"));
    assert_eq!(
        badge_for_str("waiting-on-client"),
        (BadgeTone::Waiting, "Waiting on client")
    );
    assert_eq!(badge_for_str("late"), (BadgeTone::Alert, "Late"));
}

#[test]
fn test_badge_for_str_unknown_falls_back_to_neutral() {
    assert_eq!(badge_for_str("archived"), (BadgeTone::Neutral, "Unknown"));
    assert_eq!(badge_for_str(""), (BadgeTone::Neutral, "Unknown"));
    assert_eq!(badge_for_str("COMPLETED"), (BadgeTone::Neutral, "Unknown"));
}
