//! Configuration file parsing and first-run initialization.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use super::{ConfigError, defaults};

/// Contents of the configuration file.
///
/// Absent keys take their built-in defaults; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    /// Seconds between checks in continuous mode
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// Address lookup providers, in priority order
    #[serde(default = "defaults::ip_apis")]
    pub ip_apis: Vec<String>,

    /// Geolocation URL template containing `{ip}`
    #[serde(default = "defaults::location_api")]
    pub location_api: String,
}

const fn default_check_interval() -> u64 {
    defaults::CHECK_INTERVAL_SECS
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            check_interval: defaults::CHECK_INTERVAL_SECS,
            ip_apis: defaults::ip_apis(),
            location_api: defaults::location_api(),
        }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the existing file.
    Loaded,
    /// The file did not exist; defaults were written to it.
    Created,
    /// The file exists but could not be parsed; defaults are used in memory.
    Defaulted {
        /// Why the file was rejected.
        reason: String,
    },
}

impl ConfigFile {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Loads the configuration at `path`, creating it with defaults if missing.
    ///
    /// An unparseable file yields the defaults and is not overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if the
    /// default file cannot be written.
    pub fn load_or_init(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                write_default_config(path)?;
                return Ok((Self::default(), ConfigSource::Created));
            }
            Err(source) => {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        match Self::parse(&content) {
            Ok(config) => Ok((config, ConfigSource::Loaded)),
            Err(e) => Ok((
                Self::default(),
                ConfigSource::Defaulted {
                    reason: e.to_string(),
                },
            )),
        }
    }
}

/// Writes the commented default configuration to `path`.
///
/// # Errors
///
/// Returns an error if the file (or its parent directory) cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let to_error = |source| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    std::fs::write(path, default_config_template()).map_err(to_error)
}

/// Generates the default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    let providers: String = defaults::IP_APIS
        .iter()
        .map(|api| format!("    \"{api}\",\n"))
        .collect();

    format!(
        r#"# ipwatch configuration file

# Seconds between checks in `monitor` mode (default: {interval})
# Values below 10 are likely to hit provider rate limits.
check_interval = {interval}

# Address lookup providers, tried in order until one answers.
# Each must return JSON with an "ip" field or an "origin" field.
ip_apis = [
{providers}]

# Geolocation provider; {{ip}} is replaced by the public address.
location_api = "{location}"
"#,
        interval = defaults::CHECK_INTERVAL_SECS,
        location = defaults::LOCATION_API,
    )
}
