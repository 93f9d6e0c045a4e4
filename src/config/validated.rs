//! Validated configuration after merging CLI and file sources.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lookup::IP_PLACEHOLDER;

use super::cli::Cli;
use super::error::{ConfigError, field};
use super::file::{ConfigFile, ConfigSource};

/// Fully validated configuration ready for use by the application.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Default interval between checks
    pub check_interval: Duration,

    /// Address lookup providers, in priority order
    pub ip_apis: Vec<String>,

    /// Geolocation URL template
    pub location_api: String,

    /// Path of the history file
    pub history_file: PathBuf,

    /// Path of the log file
    pub log_file: PathBuf,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ check_interval: {}s, ip_apis: {}, location_api: {}, history: {}, log: {} }}",
            self.check_interval.as_secs(),
            self.ip_apis.len(),
            self.location_api,
            self.history_file.display(),
            self.log_file.display(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `check_interval` is zero
    /// - `ip_apis` is empty
    pub fn from_raw(cli: &Cli, file: &ConfigFile) -> Result<Self, ConfigError> {
        if file.check_interval == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::CHECK_INTERVAL,
                reason: "must be at least 1 second".to_string(),
            });
        }

        if file.ip_apis.is_empty() {
            return Err(ConfigError::missing(
                field::IP_APIS,
                "List at least one address provider in ip_apis",
            ));
        }

        if !file.location_api.contains(IP_PLACEHOLDER) {
            tracing::warn!(
                "location_api has no {IP_PLACEHOLDER} placeholder; every lookup will use the same URL"
            );
        }

        Ok(Self {
            check_interval: Duration::from_secs(file.check_interval),
            ip_apis: file.ip_apis.clone(),
            location_api: file.location_api.clone(),
            history_file: cli.history_file.clone(),
            log_file: cli.log_file.clone(),
        })
    }

    /// Loads the configuration file named by the CLI and validates it.
    ///
    /// The file is created with defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created, or if the
    /// resulting configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let (file, source) = ConfigFile::load_or_init(&cli.config)?;
        log_source(&cli.config, &source);
        Self::from_raw(cli, &file)
    }

    /// Returns the interval for continuous mode, preferring `override_secs`.
    #[must_use]
    pub fn interval(&self, override_secs: Option<u64>) -> Duration {
        override_secs.map_or(self.check_interval, Duration::from_secs)
    }
}

fn log_source(path: &Path, source: &ConfigSource) {
    match source {
        ConfigSource::Loaded => {
            tracing::debug!("Loaded configuration from {}", path.display());
        }
        ConfigSource::Created => {
            tracing::info!("Created default configuration at {}", path.display());
        }
        ConfigSource::Defaulted { reason } => {
            tracing::debug!(
                "Configuration at {} is unreadable ({reason}), using defaults",
                path.display()
            );
        }
    }
}
