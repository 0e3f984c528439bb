//! Happy path integration tests - basic functionality validation.

mod common;

use common::{init_desk, run_commands};

#[test]
fn test_init_creates_desk_tree() {
    let temp_dir = init_desk();
    assert!(temp_dir.path().join("desk/config.toml").exists());
    assert!(temp_dir.path().join("desk/engagements").is_dir());
    assert!(temp_dir.path().join("desk/documents.toml").exists());
}

#[test]
fn test_new_engagement_assigns_sequential_ids() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "engagement", "Annual accounts 2025", "--client", "ABC", "--deadline",
                "2026-06-30", "--start", "--as-of", "2026-03-01",
            ],
            &[
                "new", "engagement", "VAT registration", "--client", "XY", "--deadline",
                "2026-05-31", "--as-of", "2026-03-01",
            ],
        ],
    );

    assert!(output.contains("Created engagement"));
    assert!(output.contains("ID: ENG-2026-03-01-001"));
    assert!(output.contains("ID: ENG-2026-03-01-002"));
    assert!(!output.contains("exit: 1"));
}

#[test]
fn test_full_workflow() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "engagement", "Annual accounts 2025", "--client", "ABC", "--deadline",
                "2026-06-30", "--start", "--as-of", "2026-03-01",
            ],
            &[
                "new", "stage", "ENG-2026-03-01-001", "Collect bank statements", "--owner",
                "client", "--deadline", "2026-03-15",
            ],
            &[
                "new", "action", "ENG-2026-03-01-001", "upload", "--deadline", "2026-03-10",
                "--document", "Bank statement February",
            ],
            &["list", "engagements", "--as-of", "2026-03-05"],
            &["list", "stages", "--as-of", "2026-03-05"],
            &["list", "actions", "--as-of", "2026-03-05"],
            &["status", "--as-of", "2026-03-05"],
            &["check", "--as-of", "2026-03-05"],
        ],
    );

    assert!(output.contains("Reference: ENG-2026-03-01-001:S1"));
    assert!(output.contains("Reference: ENG-2026-03-01-001:A1"));
    assert!(output.contains("in-progress"));
    assert!(output.contains("pending"));
    assert!(output.contains("Bank statement February"));
    assert!(output.contains("All checks passed"));
    assert!(!output.contains("exit: 1"));
}

#[test]
fn test_draft_engagement_until_started() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "engagement", "Payroll setup", "--client", "ABC", "--deadline",
                "2026-09-30", "--as-of", "2026-03-01",
            ],
            &["list", "engagements", "--as-of", "2026-03-05"],
        ],
    );

    // Created without --start: listed as a draft
    assert!(output.contains("draft"));
}

#[test]
fn test_new_document_computes_serial_and_filename() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "document", "--type", "bank-statement", "--client", "ABC",
                "--description", "Bank statement February", "--date", "2026-03-05",
            ],
            &[
                "new", "document", "--type", "bank-statement", "--client", "ABC",
                "--description", "Bank statement March", "--date", "2026-04-02",
            ],
            &["list", "documents"],
        ],
    );

    assert!(output.contains("ABC-F-A06-001-BANK_STATEMENT_FEBRUARY-V1.0-2026-03-05.pdf"));
    assert!(output.contains("ABC-F-A06-002-BANK_STATEMENT_MARCH-V1.0-2026-04-02.pdf"));
    assert!(!output.contains("exit: 1"));
}

#[test]
fn test_list_engagements_json_output() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "engagement", "Annual accounts 2025", "--client", "ABC", "--deadline",
                "2026-06-30", "--start", "--as-of", "2026-03-01",
            ],
            &["list", "engagements", "-o", "json", "--as-of", "2026-03-05"],
        ],
    );

    assert!(output.contains("\"id\": \"ENG-2026-03-01-001\""));
    assert!(output.contains("\"status\": \"in-progress\""));
}

#[test]
fn test_list_cabinets_shows_reference_table() {
    let temp_dir = init_desk();

    let output = run_commands(temp_dir.path(), &[&["list", "cabinets"]]);

    assert!(output.contains("bank-statement"));
    assert!(output.contains("A06"));
    assert!(output.contains("power-of-attorney"));
}

#[test]
fn test_due_report_sorts_and_flags_overdue() {
    let temp_dir = init_desk();
    common::write_fixture_engagement(temp_dir.path());

    // 2026-04-01: stage S1 (due 03-15) and action A1 (due 03-10) are overdue,
    // stage S2 (due 04-30) and the engagement (due 06-30) are not
    let output = run_commands(temp_dir.path(), &[&["due", "--as-of", "2026-04-01"]]);

    assert!(output.contains("ENG-2026-03-01-001:S1"));
    assert!(output.contains("ENG-2026-03-01-001:A1"));
    assert!(output.contains("over"));
    assert!(output.contains("Overdue"));
    assert!(output.contains("Late"));

    // A 10-day window keeps overdue rows but drops the engagement row
    let windowed = run_commands(
        temp_dir.path(),
        &[&["due", "--within", "10", "--as-of", "2026-04-01"]],
    );
    assert!(windowed.contains(":S1"));
    assert!(!windowed.contains("Annual accounts 2025"));
}

#[test]
fn test_due_with_nothing_outstanding() {
    let temp_dir = init_desk();
    let output = run_commands(temp_dir.path(), &[&["due", "--as-of", "2026-03-05"]]);
    assert!(output.contains("Nothing due."));
    assert!(output.contains("exit: 0"));
}
