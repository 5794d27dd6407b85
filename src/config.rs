//! Configuration for the ETC data processor
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `ETC_*` environment variables. The CLI applies its own flags last.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::services::etc_csv_parser::encoding::resolve_encoding;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_INPUT_ENCODING, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_BATCH_SIZE, DEFAULT_OUTPUT_PATH,
};
use crate::{Error, Result};

/// Environment variable names for configuration overrides
pub mod env_vars {
    pub const INPUT_ENCODING: &str = "ETC_INPUT_ENCODING";
    pub const STORE_INVALID_ROWS: &str = "ETC_STORE_INVALID_ROWS";
    pub const MAX_BATCH_SIZE: &str = "ETC_MAX_BATCH_SIZE";
    pub const LOG_LEVEL: &str = "ETC_LOG_LEVEL";
    pub const OUTPUT_PATH: &str = "ETC_OUTPUT_PATH";
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Processing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Encoding label of export files
    pub input_encoding: String,

    /// Store rows that failed validation instead of counting them as errors
    pub store_invalid_rows: bool,

    /// Default for skipping duplicate trips within a batch
    pub skip_duplicates: bool,

    /// Maximum parsed rows per batch call (0 = unlimited)
    pub max_batch_size: usize,

    /// Log level
    pub log_level: String,

    /// JSON lines file the CLI appends stored records to
    pub output_path: PathBuf,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            input_encoding: DEFAULT_INPUT_ENCODING.to_string(),
            store_invalid_rows: false,
            skip_duplicates: false,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl ProcessorConfig {
    /// Set the encoding used for file input
    pub fn with_input_encoding(mut self, label: impl Into<String>) -> Self {
        self.input_encoding = label.into();
        self
    }

    /// Enable or disable storing rows that failed validation
    pub fn with_store_invalid_rows(mut self, store_invalid_rows: bool) -> Self {
        self.store_invalid_rows = store_invalid_rows;
        self
    }

    pub fn with_skip_duplicates(mut self, skip_duplicates: bool) -> Self {
        self.skip_duplicates = skip_duplicates;
        self
    }

    /// Set the per-batch row limit (0 = unlimited)
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<()> {
        resolve_encoding(&self.input_encoding).map_err(|_| {
            Error::configuration(format!(
                "unknown input encoding '{}'",
                self.input_encoding
            ))
        })?;

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(Error::configuration(format!(
                "invalid log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::configuration("output path cannot be empty"));
        }

        Ok(())
    }

    /// Whether `rows` parsed rows fit within the batch limit
    pub fn batch_size_allowed(&self, rows: usize) -> bool {
        self.max_batch_size == 0 || rows <= self.max_batch_size
    }

    /// Default configuration file location under the user config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "invalid config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Defaults, then the optional file, then process environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        Self::load_layered_with(config_file, |name| std::env::var(name).ok())
    }

    /// Layered loading with an injectable environment lookup
    pub fn load_layered_with<F>(config_file: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(env)?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(encoding) = env(env_vars::INPUT_ENCODING) {
            self.input_encoding = encoding;
        }

        if let Some(value) = env(env_vars::STORE_INVALID_ROWS) {
            self.store_invalid_rows = parse_bool(env_vars::STORE_INVALID_ROWS, &value)?;
        }

        if let Some(value) = env(env_vars::MAX_BATCH_SIZE) {
            self.max_batch_size = value.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a non-negative integer, got '{}'",
                    env_vars::MAX_BATCH_SIZE,
                    value
                ))
            })?;
        }

        if let Some(level) = env(env_vars::LOG_LEVEL) {
            self.log_level = level;
        }

        if let Some(path) = env(env_vars::OUTPUT_PATH) {
            self.output_path = PathBuf::from(path);
        }

        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::configuration(format!(
            "{} must be a boolean, got '{}'",
            name, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();

        assert_eq!(config.input_encoding, "shift_jis");
        assert!(!config.store_invalid_rows);
        assert!(!config.skip_duplicates);
        assert_eq!(config.max_batch_size, 10_000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_path, PathBuf::from("etc_records.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::default()
            .with_input_encoding("utf-8")
            .with_store_invalid_rows(true)
            .with_skip_duplicates(true)
            .with_max_batch_size(0)
            .with_log_level("debug")
            .with_output_path("/tmp/out.jsonl");

        assert_eq!(config.input_encoding, "utf-8");
        assert!(config.store_invalid_rows);
        assert!(config.skip_duplicates);
        assert_eq!(config.max_batch_size, 0);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_encoding = ProcessorConfig::default().with_input_encoding("klingon");
        assert!(matches!(
            bad_encoding.validate(),
            Err(Error::Configuration { .. })
        ));

        let bad_level = ProcessorConfig::default().with_log_level("loud");
        assert!(bad_level.validate().is_err());

        let empty_output = ProcessorConfig::default().with_output_path("");
        assert!(empty_output.validate().is_err());
    }

    #[test]
    fn test_batch_size_allowed() {
        let limited = ProcessorConfig::default().with_max_batch_size(2);
        assert!(limited.batch_size_allowed(2));
        assert!(!limited.batch_size_allowed(3));

        let unlimited = ProcessorConfig::default().with_max_batch_size(0);
        assert!(unlimited.batch_size_allowed(1_000_000));
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"store_invalid_rows": true, "max_batch_size": 50}}"#).unwrap();

        let config = ProcessorConfig::load_layered_with(Some(file.path()), env_from(&[])).unwrap();

        assert!(config.store_invalid_rows);
        assert_eq!(config.max_batch_size, 50);
        assert_eq!(config.input_encoding, "shift_jis");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ProcessorConfig::load_layered_with(Some(file.path()), env_from(&[]));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_batch_size": 50, "log_level": "warn"}}"#).unwrap();

        let env = env_from(&[
            ("ETC_MAX_BATCH_SIZE", "75"),
            ("ETC_STORE_INVALID_ROWS", "yes"),
            ("ETC_INPUT_ENCODING", "utf-8"),
            ("ETC_OUTPUT_PATH", "out/records.jsonl"),
        ]);
        let config = ProcessorConfig::load_layered_with(Some(file.path()), env).unwrap();

        assert_eq!(config.max_batch_size, 75);
        assert!(config.store_invalid_rows);
        assert_eq!(config.input_encoding, "utf-8");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.output_path, PathBuf::from("out/records.jsonl"));
    }

    #[test]
    fn test_env_override_errors() {
        let result =
            ProcessorConfig::load_layered_with(None, env_from(&[("ETC_MAX_BATCH_SIZE", "-1")]));
        assert!(result.is_err());

        let result = ProcessorConfig::load_layered_with(
            None,
            env_from(&[("ETC_STORE_INVALID_ROWS", "maybe")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_path() {
        if let Ok(path) = ProcessorConfig::default_config_path() {
            assert!(path.ends_with("etc-data-processor/config.json"));
        }
    }
}
