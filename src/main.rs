//! deskctl: client/staff portal CLI for accounting engagement deadlines and
//! document filing.

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use deskctl::cmd::{self, ListTarget, NameTarget, NewTarget, OutputFormat};
use deskctl::config::Config;
use deskctl::diagnostic::{Diagnostic, DiagnosticLevel};
use deskctl::write::WriteOp;
use deskctl::{lock, ui};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "deskctl")]
#[command(about = "Client/staff portal CLI for accounting engagement deadlines and document filing")]
#[command(version)]
struct Cli {
    /// Path to deskctl config (TOML)
    #[arg(short = 'C', long, global = true)]
    config: Option<PathBuf>,

    /// Effective current date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true, value_name = "DATE")]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a desk tree in the current directory
    Init {
        /// Overwrite existing config
        #[arg(short = 'f', long)]
        force: bool,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the desk store (and archive drives when configured)
    #[command(visible_alias = "lint")]
    Check {
        /// Treat warnings as errors
        #[arg(short = 'W', long)]
        deny_warnings: bool,
    },

    /// Show summary counts per derived status
    #[command(visible_alias = "stat")]
    Status,

    /// List engagements, stages, actions, documents, or cabinets
    #[command(visible_alias = "ls")]
    List {
        /// Target to list
        #[arg(value_enum)]
        target: ListTarget,
        /// Filter (status, client code, or ID fragment)
        filter: Option<String>,
        /// Maximum number of rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Create a new record
    New {
        #[command(subcommand)]
        target: NewTarget,
    },

    /// Generate or parse canonical document filenames
    Name {
        #[command(subcommand)]
        target: NameTarget,
    },

    /// Deadline report across engagements, stages, and actions
    Due {
        /// Only rows due within N days (overdue rows always included)
        #[arg(short = 'w', long, value_name = "DAYS")]
        within: Option<i64>,
    },

    /// Mark an engagement or stage completed
    Complete {
        /// Reference (ENG-... or ENG-...:S<n>)
        reference: String,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Put a stage into waiting-on-client
    Wait {
        /// Stage reference (ENG-...:S<n>)
        reference: String,
        /// Reason shown to staff while the stage waits
        #[arg(short = 'r', long)]
        reason: Option<String>,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Clear a stage's waiting-on-client flag
    Resume {
        /// Stage reference (ENG-...:S<n>)
        reference: String,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Mark a client action submitted
    Submit {
        /// Action reference (ENG-...:A<n>)
        reference: String,
        /// Fault attribution when the submission is late
        #[arg(long, value_enum)]
        fault: Option<deskctl::model::Fault>,
        /// Dry run: show what would be written
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(&cli);

    match result {
        Ok(diags) => {
            let has_errors = diags.iter().any(|d| d.level == DiagnosticLevel::Error);
            let has_warnings = diags.iter().any(|d| d.level == DiagnosticLevel::Warning);

            for diag in &diags {
                ui::diagnostic(diag);
            }

            if has_errors {
                ExitCode::FAILURE
            } else if has_warnings {
                if matches!(
                    cli.command,
                    Commands::Check {
                        deny_warnings: true,
                        ..
                    }
                ) {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                }
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Vec<Diagnostic>> {
    let config = Config::load(cli.config.as_deref())?;

    // The effective "today" is resolved exactly once; every status derivation
    // below is a pure function of this value.
    let as_of = cli
        .as_of
        .unwrap_or_else(|| Local::now().date_naive());

    // Mutating commands take the exclusive store lock (init creates the tree
    // and so cannot)
    let _lock = match &cli.command {
        Commands::New { .. }
        | Commands::Complete { .. }
        | Commands::Wait { .. }
        | Commands::Resume { .. }
        | Commands::Submit { .. } => Some(lock::acquire_desk_lock(&config)?),
        _ => None,
    };

    match &cli.command {
        Commands::Init { force, dry_run } => {
            cmd::new::init_desk(&config, *force, WriteOp::from_dry_run(*dry_run))
        }
        Commands::Check { deny_warnings: _ } => cmd::check::check_all(&config, as_of),
        Commands::Status => cmd::status::show_status(&config, as_of),
        Commands::List {
            target,
            filter,
            limit,
            output,
        } => cmd::list::list(&config, *target, filter.as_deref(), *limit, *output, as_of),
        Commands::New { target } => cmd::new::create(&config, target, as_of),
        Commands::Name { target } => cmd::name::name(target),
        Commands::Due { within } => cmd::due::due(&config, *within, as_of),
        Commands::Complete { reference, dry_run } => cmd::lifecycle::complete(
            &config,
            reference,
            as_of,
            WriteOp::from_dry_run(*dry_run),
        ),
        Commands::Wait {
            reference,
            reason,
            dry_run,
        } => cmd::lifecycle::wait(
            &config,
            reference,
            reason.as_deref(),
            WriteOp::from_dry_run(*dry_run),
        ),
        Commands::Resume { reference, dry_run } => {
            cmd::lifecycle::resume(&config, reference, WriteOp::from_dry_run(*dry_run))
        }
        Commands::Submit {
            reference,
            fault,
            dry_run,
        } => cmd::lifecycle::submit(
            &config,
            reference,
            *fault,
            as_of,
            WriteOp::from_dry_run(*dry_run),
        ),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(*shell, &mut command, "deskctl", &mut io::stdout());
            Ok(vec![])
        }
    }
}
