//! Runtime configuration.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `config.yaml` (from `--config`, else `<config dir>/wiki_discover/config.yaml` if present)
//! 3. Command-line flags and their environment variables
//!
//! ```yaml
//! language: tr
//! desired_count: 10
//! min_length: 5000
//! batch_size: 10
//! max_attempts: 200
//! store_dir: /home/me/.local/share/wiki_discover
//! request_timeout_secs: 30
//! open_in_browser: true
//! ```

use crate::acquisition::{AcquisitionSettings, DEFAULT_DESIRED_COUNT, DEFAULT_MIN_LENGTH};
use crate::api::{DEFAULT_ENDPOINT, LANG_PLACEHOLDER};
use crate::error::{Error, Result};
use crate::models::Language;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const APP_DIR: &str = "wiki_discover";
pub const DEFAULT_BATCH_SIZE: u32 = 10;
/// MediaWiki's `grnlimit` ceiling for clients with `apihighlimits`.
pub const MAX_BATCH_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shape of `config.yaml`. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub language: Option<Language>,
    pub desired_count: Option<usize>,
    pub min_length: Option<u64>,
    pub batch_size: Option<u32>,
    pub max_attempts: Option<usize>,
    pub store_dir: Option<PathBuf>,
    pub api_endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub open_in_browser: Option<bool>,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub language: Option<Language>,
    pub desired_count: Option<usize>,
    pub min_length: Option<u64>,
    pub batch_size: Option<u32>,
    pub max_attempts: Option<usize>,
    pub store_dir: Option<PathBuf>,
    pub no_open: bool,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: Language,
    pub acquisition: AcquisitionSettings,
    pub batch_size: u32,
    pub store_dir: PathBuf,
    pub api_endpoint: String,
    pub request_timeout: Duration,
    pub open_in_browser: bool,
}

/// `<config dir>/wiki_discover/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.yaml"))
}

pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Parse a YAML config document.
pub fn parse_config(raw: &str) -> Result<FileConfig> {
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}

/// Load the config file.
///
/// An explicit path must exist. The default location is optional and skipped
/// silently when absent.
#[instrument(level = "debug")]
pub async fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if tokio::fs::try_exists(&p).await.unwrap_or(false) => p,
            _ => {
                debug!("No config file; using defaults");
                return Ok(FileConfig::default());
            }
        },
    };

    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
        Error::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    let config = parse_config(&raw)?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

impl Settings {
    /// Merge defaults, file values and command-line overrides, then validate.
    pub fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let settings = Settings {
            language: cli.language.or(file.language).unwrap_or_default(),
            acquisition: AcquisitionSettings {
                desired_count: cli
                    .desired_count
                    .or(file.desired_count)
                    .unwrap_or(DEFAULT_DESIRED_COUNT),
                min_length: cli.min_length.or(file.min_length).unwrap_or(DEFAULT_MIN_LENGTH),
                max_attempts: cli.max_attempts.or(file.max_attempts),
            },
            batch_size: cli.batch_size.or(file.batch_size).unwrap_or(DEFAULT_BATCH_SIZE),
            store_dir: cli
                .store_dir
                .or(file.store_dir)
                .unwrap_or_else(default_store_dir),
            api_endpoint: file.api_endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            open_in_browser: !cli.no_open && file.open_in_browser.unwrap_or(true),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(Error::Config(format!(
                "batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }
        if !self.api_endpoint.contains(LANG_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "api_endpoint must contain {LANG_PLACEHOLDER}"
            )));
        }
        if self.acquisition.max_attempts == Some(0) {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}
