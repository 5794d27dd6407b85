//! Command implementations for the ETC data processor CLI
//!
//! Each command is implemented in its own module.

pub mod health;
pub mod process;
pub mod shared;
pub mod validate;

use tokio_util::sync::CancellationToken;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `process`: parse an export and store its records
/// - `validate`: check an export without storing
/// - `health`: print service health
pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => process::run_process(process_args, cancel).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        Some(Commands::Health) | None => health::run_health().await,
    }
}
