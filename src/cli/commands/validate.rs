//! Validate command implementation
//!
//! Checks an export without storing anything and prints the report.

use std::sync::Arc;

use anyhow::{Context, bail};
use colored::*;
use tracing::debug;

use super::shared::{load_configuration, read_text_file, setup_logging};
use crate::app::services::data_processor::{
    DataProcessorService, ValidateRequest, ValidationReport,
};
use crate::app::services::etc_csv_parser::decode_bytes;
use crate::app::services::record_processor::MemoryStore;
use crate::cli::args::{OutputFormat, ValidateArgs};

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config_file.as_deref())?;
    if args.verbose > 0 {
        config.log_level = args.get_log_level().to_string();
    }
    config.validate().context("Invalid configuration")?;

    setup_logging(&config.log_level, false);
    debug!("Validate arguments: {:?}", args);

    let csv_data = if args.text {
        read_text_file(&args.file)?
    } else {
        let bytes = std::fs::read(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        decode_bytes(&bytes, &config.input_encoding)?
    };

    let service = DataProcessorService::with_config(Arc::new(MemoryStore::new()), config)?;
    let report = service.validate_csv_data(&ValidateRequest {
        csv_data,
        account_id: String::new(),
    });

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => println!("{}", format_report(&report)),
    }

    if !report.is_valid {
        bail!("{} validation issue(s) found", report.errors.len());
    }

    Ok(())
}

/// Render a validation report for humans
pub fn format_report(report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    let verdict = if report.is_valid {
        "VALID".green().bold()
    } else {
        "INVALID".red().bold()
    };
    lines.push(format!("Validation result: {}", verdict));
    lines.push(format!("  Records:    {}", report.total_records));
    lines.push(format!("  Duplicates: {}", report.duplicate_count));
    lines.push(format!("  Issues:     {}", report.errors.len()));

    for issue in &report.errors {
        let field = if issue.field.is_empty() {
            String::new()
        } else {
            format!(" [{}]", issue.field)
        };
        lines.push(format!(
            "  line {}{}: {}",
            issue.line_number.to_string().yellow(),
            field,
            issue.message
        ));
        if !issue.record_data.is_empty() {
            lines.push(format!("      {}", issue.record_data.dimmed()));
        }
    }

    lines.join("\n")
}
