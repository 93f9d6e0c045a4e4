//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use ipwatch::config::ConfigError;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable or invalid configuration.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - no public address could be determined.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError, config_path: &Path) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::FileWrite { .. } => {
            eprintln!("\nCheck the file permissions or pass another path with --config.");
        }
        ConfigError::MissingRequired { .. } | ConfigError::InvalidDuration { .. } => {
            eprintln!(
                "\nFix {} or delete it to have the defaults written again.",
                config_path.display()
            );
        }
        ConfigError::TomlParse(_) => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Log lines go to stderr and are appended to `log_file`. If the log file
/// cannot be opened, only the console is used.
pub fn setup_tracing(verbose: bool, log_file: &Path) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (file, open_error) = match open_log_file(log_file) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        tracing::warn!(
            "Cannot open log file {} ({e}), logging to console only",
            log_file.display()
        );
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
