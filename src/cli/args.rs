//! Command-line argument definitions for the ETC data processor
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ETC data processor
///
/// Ingests ETC toll usage exports, validates every row and stores the
/// accepted records as JSON lines.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "etc-data-processor",
    version,
    about = "Ingest ETC toll usage CSV exports",
    long_about = "Parses ETC toll usage exports in any of the historical header layouts \
                  (or the header-less legacy layout), validates each row, detects duplicate \
                  trips and stores the accepted records as JSON lines."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse an export and store its records
    Process(ProcessArgs),
    /// Check an export without storing anything
    Validate(ValidateArgs),
    /// Print service health as JSON
    Health,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Export file to ingest
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Account the records belong to
    #[arg(short = 'a', long = "account", value_name = "ID")]
    pub account_id: String,

    /// Skip trips already stored earlier in the same file
    #[arg(long = "skip-duplicates")]
    pub skip_duplicates: bool,

    /// Treat the file as UTF-8 text instead of the legacy encoding
    #[arg(long = "text")]
    pub text: bool,

    /// Parse and convert, but keep records in memory only
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// JSON lines file to append stored records to
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Export file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the file as UTF-8 text instead of the legacy encoding
    #[arg(long = "text")]
    pub text: bool,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Configuration file (JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Map a verbosity count to a log level
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ProcessArgs {
    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        level_for(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateArgs {
    pub fn get_log_level(&self) -> &'static str {
        level_for(self.verbose, false)
    }
}
