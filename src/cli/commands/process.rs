//! Process command implementation
//!
//! Parses one export, stores its records and prints a summary.

use std::sync::Arc;

use anyhow::{Context, bail};
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::shared::{load_configuration, read_text_file, setup_logging};
use crate::app::services::data_processor::{
    DataProcessorService, ProcessDataRequest, ProcessFileRequest, ProcessResponse,
};
use crate::app::services::record_processor::{
    JsonLinesStore, MemoryStore, RecordProcessor, RecordStore,
};
use crate::cli::args::ProcessArgs;
use crate::config::ProcessorConfig;

/// Diagnostics printed before the list is truncated
const MAX_PRINTED_ERRORS: usize = 20;

/// Process command runner
///
/// The store pass runs on the blocking pool; `cancel` stops it between
/// records.
pub async fn run_process(args: ProcessArgs, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;

    setup_logging(&config.log_level, args.quiet);
    debug!("Process arguments: {:?}", args);

    let store: Arc<dyn RecordStore> = if args.dry_run {
        info!("Dry run: records are kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(JsonLinesStore::new(&config.output_path))
    };

    let mut service = DataProcessorService::with_config(store, config.clone())?;
    if args.show_progress() {
        service = service.with_progress_bar(RecordProcessor::create_progress_bar(0));
    }

    let task_args = args.clone();
    let task_cancel = cancel.clone();
    let response = tokio::task::spawn_blocking(move || process_input(&service, &task_args, &task_cancel))
        .await
        .context("Processing task failed")??;

    if !args.quiet {
        println!("{}", format_summary(&response, &args, &config));
    }

    if cancel.is_cancelled() {
        bail!("Processing interrupted by user");
    }

    Ok(())
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut ProcessorConfig, args: &ProcessArgs) {
    if let Some(output_path) = &args.output_path {
        config.output_path = output_path.clone();
    }
    if args.skip_duplicates {
        config.skip_duplicates = true;
    }
    if args.verbose > 0 || args.quiet {
        config.log_level = args.get_log_level().to_string();
    }
}

fn process_input(
    service: &DataProcessorService,
    args: &ProcessArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<ProcessResponse> {
    let skip_duplicates = service.config().skip_duplicates;

    let response = if args.text {
        let request = ProcessDataRequest {
            csv_data: read_text_file(&args.file)?,
            account_id: args.account_id.clone(),
            skip_duplicates,
        };
        service.process_csv_data(&request, cancel)
    } else {
        let request = ProcessFileRequest {
            csv_file_path: args.file.clone(),
            account_id: args.account_id.clone(),
            skip_duplicates,
        };
        service.process_csv_file(&request, cancel)
    };

    response.with_context(|| format!("Failed to process {}", args.file.display()))
}

/// Render the end-of-run summary
pub fn format_summary(
    response: &ProcessResponse,
    args: &ProcessArgs,
    config: &ProcessorConfig,
) -> String {
    let stats = &response.stats;
    let mut lines = Vec::new();

    let headline = if response.success {
        response.message.green().bold()
    } else {
        response.message.yellow().bold()
    };
    lines.push(headline.to_string());
    lines.push(format!("  {:<10} {}", "Total:", stats.total));
    lines.push(format!("  {:<10} {}", "Saved:", stats.saved.to_string().green()));
    lines.push(format!("  {:<10} {}", "Skipped:", stats.skipped.to_string().yellow()));
    lines.push(format!("  {:<10} {}", "Errored:", stats.errored.to_string().red()));

    if args.dry_run {
        lines.push(format!("  {}", "Dry run: nothing was written".dimmed()));
    } else {
        lines.push(format!("  {:<10} {}", "Output:", config.output_path.display()));
    }

    if !response.errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".red().bold().to_string());
        for error in response.errors.iter().take(MAX_PRINTED_ERRORS) {
            lines.push(format!("  {}", error));
        }
        if response.errors.len() > MAX_PRINTED_ERRORS {
            lines.push(format!(
                "  ... and {} more",
                response.errors.len() - MAX_PRINTED_ERRORS
            ));
        }
    }

    lines.join("\n")
}
