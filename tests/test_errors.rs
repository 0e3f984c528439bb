//! Error case tests - invalid references, missing stores, bad input.

mod common;

use common::{init_desk, run_commands, write_fixture_engagement};
use tempfile::TempDir;

#[test]
fn test_write_command_without_init_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "engagement", "Orphan", "--client", "ABC", "--deadline", "2026-06-30",
        ]],
    );

    assert!(output.contains("Run 'deskctl init' first"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_init_twice_requires_force() {
    let temp_dir = init_desk();

    let output = run_commands(temp_dir.path(), &[&["init"]]);
    assert!(output.contains("already exists"));
    assert!(output.contains("exit: 1"));

    let forced = run_commands(temp_dir.path(), &[&["init", "-f"]]);
    assert!(forced.contains("Desk initialized"));
    assert!(forced.contains("exit: 0"));
}

#[test]
fn test_unknown_engagement_reference() {
    let temp_dir = init_desk();

    let output = run_commands(temp_dir.path(), &[&["complete", "ENG-2026-01-01-999"]]);

    assert!(output.contains("E0102"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_malformed_reference_syntax() {
    let temp_dir = init_desk();
    write_fixture_engagement(temp_dir.path());

    for reference in ["FOO-1", "ENG-2026-03-01-001:X1", "ENG-2026-03-01-001:S"] {
        let output = run_commands(temp_dir.path(), &[&["complete", reference]]);
        assert!(output.contains("E0802"), "reference: {reference}");
        assert!(output.contains("exit: 1"));
    }
}

#[test]
fn test_stage_commands_reject_wrong_ref_kind() {
    let temp_dir = init_desk();
    write_fixture_engagement(temp_dir.path());

    // wait/resume need a stage ref; submit needs an action ref
    let output = run_commands(temp_dir.path(), &[&["wait", "ENG-2026-03-01-001"]]);
    assert!(output.contains("Expected a stage reference"));
    assert!(output.contains("exit: 1"));

    let output = run_commands(temp_dir.path(), &[&["submit", "ENG-2026-03-01-001:S1"]]);
    assert!(output.contains("Expected an action reference"));
    assert!(output.contains("exit: 1"));

    let output = run_commands(temp_dir.path(), &[&["complete", "ENG-2026-03-01-001:A1"]]);
    assert!(output.contains("Use `deskctl submit`"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_missing_stage_and_action_numbers() {
    let temp_dir = init_desk();
    write_fixture_engagement(temp_dir.path());

    let output = run_commands(temp_dir.path(), &[&["complete", "ENG-2026-03-01-001:S9"]]);
    assert!(output.contains("E0201"));
    assert!(output.contains("exit: 1"));

    let output = run_commands(temp_dir.path(), &[&["submit", "ENG-2026-03-01-001:A9"]]);
    assert!(output.contains("E0301"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_new_engagement_rejects_bad_inputs() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "engagement", "Bad client", "--client", "abcd", "--deadline", "2026-06-30",
        ]],
    );
    assert!(output.contains("Invalid client code"));
    assert!(output.contains("exit: 1"));

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "engagement", "Bad deadline", "--client", "ABC", "--deadline", "soon",
        ]],
    );
    assert!(output.contains("Invalid deadline"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_new_engagement_without_client_code_anywhere() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[&["new", "engagement", "No client", "--deadline", "2026-06-30"]],
    );

    assert!(output.contains("No client code"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_new_document_unknown_type() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "document", "--type", "mystery-box", "--client", "ABC", "--description", "X",
        ]],
    );

    assert!(output.contains("E0401"));
    assert!(output.contains("exit: 1"));
}

#[test]
fn test_new_stage_on_missing_engagement() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "stage", "ENG-2026-01-01-001", "Ghost stage", "--deadline", "2026-06-30",
        ]],
    );

    assert!(output.contains("E0102"));
    assert!(output.contains("exit: 1"));
}
