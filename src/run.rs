//! Application execution logic.
//!
//! This module wires the production HTTP client, resolvers and history
//! file into a [`Monitor`] and dispatches the selected command.

use std::process::ExitCode;

use thiserror::Error;
use tokio::signal;

use ipwatch::config::{Command, ValidatedConfig};
use ipwatch::fetch::ReqwestClient;
use ipwatch::history::{FileHistoryStore, HistoryStore, LoadResult, render_history};
use ipwatch::lookup::{AddressResolver, LocationResolver};
use ipwatch::monitor::Monitor;

use crate::app::exit_code;

/// The monitor as assembled for production use.
type AppMonitor =
    Monitor<AddressResolver<ReqwestClient>, LocationResolver<ReqwestClient>, FileHistoryStore>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The single check could not determine the public address.
    #[error("Check failed: no public address could be determined")]
    NoAddress,
}

/// Executes `command` with the given configuration.
///
/// # Errors
///
/// Returns [`RunError::NoAddress`] if a single-shot check found no address.
/// Continuous monitoring and the history dump never fail.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real network access and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    match command {
        Command::Once => {
            let monitor = build_monitor(&config);
            once_outcome(monitor.run_once().await)
        }
        Command::Monitor { interval } => {
            let monitor = build_monitor(&config);
            let summary = monitor
                .run_continuous(config.interval(interval), shutdown_signal())
                .await;
            tracing::debug!(
                "{} of {} check(s) failed",
                summary.failures,
                summary.cycles
            );
            Ok(())
        }
        Command::History => {
            print!("{}", history_report(&FileHistoryStore::new(&config.history_file)));
            Ok(())
        }
    }
}

/// Maps the outcome of [`execute`] to the process exit code.
///
/// A failed check has already been logged at error level by the monitor,
/// so the error is only traced here.
pub fn exit_status(result: Result<(), RunError>) -> ExitCode {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!("{e}");
            exit_code::runtime_error()
        }
    }
}

/// Assembles the production monitor from configuration.
fn build_monitor(config: &ValidatedConfig) -> AppMonitor {
    let client = ReqwestClient::new();
    let addresses = AddressResolver::new(client.clone(), config.ip_apis.clone());
    let origins = LocationResolver::new(client, config.location_api.clone());
    let store = FileHistoryStore::new(&config.history_file);

    Monitor::new(addresses, origins, store)
}

/// Maps the single-shot result to the process outcome.
const fn once_outcome(succeeded: bool) -> Result<(), RunError> {
    if succeeded {
        Ok(())
    } else {
        Err(RunError::NoAddress)
    }
}

/// Renders the stored history for display.
///
/// An unreadable history file is shown as empty.
fn history_report(store: &impl HistoryStore) -> String {
    let history = match store.load() {
        LoadResult::Corrupted { reason } => {
            tracing::debug!("Ignoring unreadable history ({reason})");
            Vec::new()
        }
        result => result.into_history(),
    };
    render_history(&history)
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
