//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and input reading used by
//! more than one command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::config::ProcessorConfig;

/// Set up structured logging on stderr
///
/// `RUST_LOG` overrides the level chosen from the command line.
pub fn setup_logging(log_level: &str, compact: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("etc_data_processor={}", log_level)));

    let result = if compact {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // a subscriber may already be installed when commands run in-process
    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using the layered approach (defaults -> file -> env)
///
/// Without an explicit file, the default location is used when it exists.
pub fn load_configuration(config_file: Option<&Path>) -> anyhow::Result<ProcessorConfig> {
    let default_config_path: Option<PathBuf> = match config_file {
        Some(_) => None,
        None => ProcessorConfig::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    };

    let config_file = config_file.or(default_config_path.as_deref());

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file found, using defaults and environment variables"),
    }

    let config = ProcessorConfig::load_layered(config_file).context("Failed to load configuration")?;
    Ok(config)
}

/// Read an export as UTF-8 text (for `--text`)
pub fn read_text_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))
}
