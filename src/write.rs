//! File write helpers and the dry-run write mode.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

/// Whether a mutating command executes or only previews its writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Execute,
    Preview,
}

impl WriteOp {
    pub fn is_preview(self) -> bool {
        self == Self::Preview
    }

    /// Map a `--dry-run` flag to a write mode
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::Preview } else { Self::Execute }
    }
}

/// Write a file, or preview what would be written
pub fn write_file(path: &Path, content: &str, op: WriteOp) -> Result<()> {
    match op {
        WriteOp::Execute => std::fs::write(path, content)
            .with_context(|| format!("Failed to write: {}", path.display())),
        WriteOp::Preview => {
            crate::ui::dry_run_file_preview(path, content);
            Ok(())
        }
    }
}

/// Create a directory tree, or preview the creation
pub fn create_dir_all(path: &Path, op: WriteOp) -> Result<()> {
    match op {
        WriteOp::Execute => std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display())),
        WriteOp::Preview => {
            crate::ui::dry_run_dir_preview(path);
            Ok(())
        }
    }
}

/// Get today's date in ISO format.
///
/// Read exactly once at the top of the CLI to resolve the effective date;
/// nothing below `main` consults a clock.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
