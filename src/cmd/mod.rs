//! Command implementations.

use crate::model::{ActionKind, Party};
use clap::{Subcommand, ValueEnum};

pub mod check;
pub mod due;
pub mod lifecycle;
pub mod list;
pub mod name;
pub mod new;
pub mod status;

/// Targets for `deskctl list`
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ListTarget {
    Engagements,
    Stages,
    Actions,
    Documents,
    Cabinets,
}

/// Output formats for `deskctl list`
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Colorized table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Tab-separated values
    Plain,
}

/// Targets for `deskctl new`
#[derive(Subcommand, Clone, Debug)]
pub enum NewTarget {
    /// Create a new engagement
    Engagement {
        /// Engagement title
        title: String,
        /// Client code (2-3 uppercase letters); falls back to the config default
        #[arg(long)]
        client: Option<String>,
        /// Engagement deadline (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        deadline: String,
        /// Start immediately instead of leaving the engagement a draft
        #[arg(long)]
        start: bool,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// Add a stage to an engagement
    Stage {
        /// Engagement ID (ENG-...)
        engagement: String,
        /// Stage display name
        name: String,
        /// Responsible party
        #[arg(long, value_enum, default_value = "accounting-staff")]
        owner: Party,
        /// Stage deadline (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        deadline: String,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// Add a client action to an engagement
    Action {
        /// Engagement ID (ENG-...)
        engagement: String,
        /// Kind of obligation
        #[arg(value_enum)]
        kind: ActionKind,
        /// Action deadline (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        deadline: String,
        /// Name of the document the client must provide
        #[arg(long)]
        document: Option<String>,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },
    /// File a new document: compute the serial, generate the canonical
    /// filename, and append to the index
    Document {
        /// Document-type category key (see `list cabinets`)
        #[arg(long = "type", value_name = "KEY")]
        doc_type: String,
        /// Client code (2-3 uppercase letters); falls back to the config default
        #[arg(long)]
        client: Option<String>,
        /// Free-text description (normalized into the filename)
        #[arg(long)]
        description: String,
        /// Version string (digits and dots)
        #[arg(long, default_value = "1.0")]
        version: String,
        /// Document date (YYYY-MM-DD); defaults to the effective date
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// File extension
        #[arg(long, default_value = "pdf")]
        extension: String,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },
}

/// Targets for `deskctl name`
#[derive(Subcommand, Clone, Debug)]
pub enum NameTarget {
    /// Generate a canonical filename from descriptor fields (store-free)
    Generate {
        /// Client code (2-3 uppercase letters)
        #[arg(long)]
        client: String,
        /// Document-type category key (resolves cabinet and drive)
        #[arg(long = "type", value_name = "KEY")]
        doc_type: String,
        /// Serial number (1-999)
        #[arg(long, default_value_t = 1)]
        serial: u32,
        /// Free-text description
        #[arg(long)]
        description: String,
        /// Version string
        #[arg(long, default_value = "1.0")]
        version: String,
        /// Document date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: String,
        /// File extension
        #[arg(long, default_value = "pdf")]
        extension: String,
    },
    /// Parse a filename back into its descriptor fields
    Parse {
        /// Filename to parse
        filename: String,
    },
}
