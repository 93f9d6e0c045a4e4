//! Configuration layer for ipwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Configuration file handling ([`ConfigFile`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Lifecycle
//!
//! The configuration file is read once at startup:
//!
//! 1. **Missing file** - a commented default file is written and used
//! 2. **Unparseable file** - built-in defaults are used; the file is left untouched
//! 3. **Valid file** - its values are used, with defaults for absent keys
//!
//! The interval given to `monitor` on the command line overrides
//! `check_interval` for that run only.

mod cli;
pub mod defaults;
mod error;
mod file;
mod validated;

#[cfg(test)]
mod file_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use file::{ConfigFile, ConfigSource, default_config_template};
pub use validated::ValidatedConfig;
