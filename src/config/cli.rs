//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// ipwatch: public IP and location change monitor
///
/// Looks up the public address of this machine and where it appears to be,
/// and keeps a history of every change.
#[derive(Debug, Parser)]
#[command(name = "ipwatch")]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (created with defaults if missing)
    #[arg(long, short, global = true, default_value = defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the history file
    #[arg(long = "history-file", global = true, default_value = defaults::HISTORY_FILE)]
    pub history_file: PathBuf,

    /// Path to the log file (appended to)
    #[arg(long = "log-file", global = true, default_value = defaults::LOG_FILE)]
    pub log_file: PathBuf,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ipwatch
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run a single check
    Once,

    /// Check continuously until interrupted
    Monitor {
        /// Seconds between checks (overrides `check_interval`)
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },

    /// Show the recorded history
    History,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
