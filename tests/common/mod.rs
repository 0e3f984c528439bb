//! Common test helpers for CLI integration tests.

#![allow(dead_code)] // Functions used across different test binaries

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Get today's date in YYYY-MM-DD format (same as deskctl uses)
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Run deskctl commands in a directory and capture output.
pub fn run_commands(dir: &Path, commands: &[&[&str]]) -> String {
    let mut output = String::new();

    for args in commands {
        output.push_str(&format!("$ deskctl {}\n", args.join(" ")));

        let result = Command::new(env!("CARGO_BIN_EXE_deskctl"))
            .args(*args)
            .current_dir(dir)
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run deskctl");

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);

        if !stdout.is_empty() {
            output.push_str(&stdout);
            if !stdout.ends_with('\n') {
                output.push('\n');
            }
        }
        if !stderr.is_empty() {
            output.push_str(&stderr);
            if !stderr.ends_with('\n') {
                output.push('\n');
            }
        }

        output.push_str(&format!("exit: {}\n\n", result.status.code().unwrap_or(-1)));
    }

    output
}

/// Initialize a desk tree in a temp directory
pub fn init_desk() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let result = Command::new(env!("CARGO_BIN_EXE_deskctl"))
        .args(["init"])
        .current_dir(temp_dir.path())
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run deskctl init");
    assert!(result.status.success(), "deskctl init failed");
    temp_dir
}

/// Write a minimal valid engagement with one stage and one client action.
///
/// Deadlines straddle 2026-04-01: the stage is due 2026-03-15, the action
/// 2026-03-10, the engagement 2026-06-30.
pub fn write_fixture_engagement(dir: &Path) {
    let engagements = dir.join("desk/engagements");
    fs::create_dir_all(&engagements).unwrap();

    fs::write(
        engagements.join("2026-03-01-annual-accounts-2025.toml"),
        r#"[deskctl]
schema = 1
id = "ENG-2026-03-01-001"
client_code = "ABC"
title = "Annual accounts 2025"
started = "2026-03-01"
deadline = "2026-06-30"
completed = false

[content]
description = "Prepare and file the 2025 annual accounts."

[[stage]]
no = 1
name = "Collect bank statements"
owner = "client"
deadline = "2026-03-15"
completed = false
waiting_on_client = false

[[stage]]
no = 2
name = "Draft financial statements"
owner = "accounting-staff"
deadline = "2026-04-30"
completed = false
waiting_on_client = false

[[action]]
no = 1
kind = "upload"
document = "Bank statement February"
deadline = "2026-03-10"
submitted = false
"#,
    )
    .unwrap();
}

/// Write a small valid document index
pub fn write_fixture_documents(dir: &Path) {
    fs::write(
        dir.join("desk/documents.toml"),
        r#"[[document]]
client_code = "ABC"
drive = "F"
cabinet_code = "A06"
serial = 1
description = "BANK_STATEMENT_JANUARY"
version = "1.0"
date = "2026-02-03"
extension = "pdf"
filename = "ABC-F-A06-001-BANK_STATEMENT_JANUARY-V1.0-2026-02-03.pdf"
"#,
    )
    .unwrap();
}
