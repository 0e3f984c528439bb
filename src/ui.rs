//! CLI output formatting with colors.
//!
//! Provides consistent, colorized output for all CLI commands.
//! Colors auto-disable when output is not a TTY (agent-friendly).

use crate::schedule::BadgeTone;
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::path::Path;

/// Check if stderr supports colors (TTY detection)
fn use_colors() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

/// Check if stdout supports colors (table/list output)
pub fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

// =============================================================================
// Color Helpers
// =============================================================================

/// Format a success message (green checkmark prefix)
pub fn success(msg: impl Display) {
    if use_colors() {
        eprintln!("{} {}", "✓".green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Format an info/action message (no special prefix)
pub fn info(msg: impl Display) {
    eprintln!("{}", msg);
}

/// Format an indented detail line under a primary message
pub fn sub_info(msg: impl Display) {
    eprintln!("  {}", msg);
}

/// Format a created item message
pub fn created(kind: &str, path: &Path) {
    if use_colors() {
        eprintln!("{} {}: {}", "Created".green(), kind, path.display().cyan());
    } else {
        eprintln!("Created {}: {}", kind, path.display());
    }
}

/// Format a created path message (init output)
pub fn created_path(path: &Path) {
    if use_colors() {
        eprintln!("{} {}", "Created".green(), path.display().cyan());
    } else {
        eprintln!("Created {}", path.display());
    }
}

/// Format a status transition message
pub fn transitioned(id: &str, action: &str, target: &str) {
    if use_colors() {
        eprintln!("{} {}: {}", action, id.cyan().bold(), target.green());
    } else {
        eprintln!("{} {}: {}", action, id, target);
    }
}

/// Format a generated filename message
pub fn filed(id: &str, filename: &str) {
    if use_colors() {
        eprintln!("Filed {}: {}", id.cyan().bold(), filename.green());
    } else {
        eprintln!("Filed {}: {}", id, filename);
    }
}

/// Format "not found" message
pub fn not_found(kind: &str, location: &Path) {
    if use_colors() {
        eprintln!("No {}s found in {}", kind, location.display().cyan());
    } else {
        eprintln!("No {}s found in {}", kind, location.display());
    }
}

/// Format check summary header
pub fn check_header() {
    if use_colors() {
        eprintln!("{}:", "Checked".bold());
    } else {
        eprintln!("Checked:");
    }
}

/// Format check count line
pub fn check_count(count: usize, kind: &str) {
    if use_colors() {
        eprintln!("  {} {}", count.to_string().cyan().bold(), kind);
    } else {
        eprintln!("  {} {}", count, kind);
    }
}

/// Preview a file write in dry-run mode
pub fn dry_run_file_preview(path: &Path, content: &str) {
    if use_colors() {
        eprintln!("{} {}", "Would write".yellow(), path.display().cyan());
    } else {
        eprintln!("Would write {}", path.display());
    }
    for line in content.lines() {
        eprintln!("  | {line}");
    }
}

/// Preview a directory creation in dry-run mode
pub fn dry_run_dir_preview(path: &Path) {
    if use_colors() {
        eprintln!("{} {}", "Would create".yellow(), path.display().cyan());
    } else {
        eprintln!("Would create {}", path.display());
    }
}

// =============================================================================
// Badge tones
// =============================================================================

/// Map an engine badge tone to a table cell color
pub fn tone_color(tone: BadgeTone) -> comfy_table::Color {
    match tone {
        BadgeTone::Positive => comfy_table::Color::Green,
        BadgeTone::Active => comfy_table::Color::Cyan,
        BadgeTone::Waiting => comfy_table::Color::Yellow,
        BadgeTone::Alert => comfy_table::Color::Red,
        BadgeTone::Muted => comfy_table::Color::DarkGrey,
        BadgeTone::Neutral => comfy_table::Color::White,
    }
}

// =============================================================================
// Diagnostic Formatting
// =============================================================================

use crate::diagnostic::{Diagnostic, DiagnosticLevel};

/// Format a diagnostic message
pub fn diagnostic(diag: &Diagnostic) {
    if use_colors() {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error".red().bold().to_string(),
            DiagnosticLevel::Warning => "warning".yellow().bold().to_string(),
        };
        eprintln!(
            "{}[{}]: {} ({})",
            level_str,
            diag.code.code().bright_black(),
            diag.message,
            diag.file.cyan()
        );
    } else {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
        };
        eprintln!(
            "{}[{}]: {} ({})",
            level_str,
            diag.code.code(),
            diag.message,
            diag.file
        );
    }
}
