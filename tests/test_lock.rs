//! Lock integration tests - verify file lock behavior for concurrent writes.

mod common;

use common::{init_desk, run_commands};
use std::fs;

#[test]
fn test_write_command_creates_lock_file() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[&[
            "new", "engagement", "Lock test", "--client", "ABC", "--deadline", "2026-06-30",
        ]],
    );

    assert!(output.contains("Created engagement"));

    // Lock is released after the command finishes, but the file exists
    let lock_path = temp_dir.path().join("desk/.deskctl.lock");
    assert!(
        lock_path.exists(),
        "Lock file should exist after write command"
    );
}

#[test]
fn test_sequential_write_commands_succeed() {
    let temp_dir = init_desk();

    let output = run_commands(
        temp_dir.path(),
        &[
            &[
                "new", "engagement", "First", "--client", "ABC", "--deadline", "2026-06-30",
            ],
            &[
                "new", "engagement", "Second", "--client", "ABC", "--deadline", "2026-07-31",
            ],
        ],
    );

    assert!(output.contains("Created engagement"));
    assert!(output.contains("exit: 0"));
    assert!(!output.contains("exit: 1"));
}

#[test]
fn test_read_commands_take_no_lock() {
    let temp_dir = init_desk();

    let lock_path = temp_dir.path().join("desk/.deskctl.lock");
    let _ = fs::remove_file(&lock_path);

    run_commands(temp_dir.path(), &[&["status"], &["check"], &["due"]]);

    assert!(
        !lock_path.exists(),
        "Read commands should not create lock file"
    );
}
