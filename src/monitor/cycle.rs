//! Check cycle and continuous monitoring loop.

use std::future::Future;
use std::time::Duration;

use crate::history::{HistoryStore, LoadResult};
use crate::lookup::{AddressLookup, LookupError, OriginLookup};
use crate::observation::{Observation, Origin};
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper};

use super::change::{Change, classify};

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod tests;

/// Intervals below this are likely to hit provider rate limits.
pub const RATE_LIMIT_FLOOR: Duration = Duration::from_secs(10);

/// What a single successful check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// The observation built by this check.
    pub observation: Observation,
    /// How it compares to the last accepted observation.
    pub change: Change,
    /// Whether the extended history was written to the store.
    pub persisted: bool,
}

/// Counters for a finished continuous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Checks that ran to completion (successfully or not).
    pub cycles: u64,
    /// Checks that could not determine the public address.
    pub failures: u64,
}

impl RunSummary {
    fn record(&mut self, result: &Result<CheckReport, LookupError>) {
        self.cycles += 1;
        if result.is_err() {
            self.failures += 1;
        }
    }
}

/// Ties address lookup, origin lookup, classification and history together.
///
/// Owns everything one check needs, so no state outlives a cycle except
/// what the history store persists.
///
/// # Type Parameters
///
/// - `A`: source of the public address
/// - `O`: source of the origin for an address
/// - `S`: history store
/// - `C`: clock used to stamp observations (defaults to [`SystemClock`])
/// - `Z`: sleeper used between checks (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct Monitor<A, O, S, C = SystemClock, Z = TokioSleeper> {
    addresses: A,
    origins: O,
    store: S,
    clock: C,
    sleeper: Z,
}

impl<A, O, S> Monitor<A, O, S> {
    /// Creates a monitor using the system clock and tokio timer.
    #[must_use]
    pub const fn new(addresses: A, origins: O, store: S) -> Self {
        Self {
            addresses,
            origins,
            store,
            clock: SystemClock,
            sleeper: TokioSleeper,
        }
    }
}

impl<A, O, S, C, Z> Monitor<A, O, S, C, Z> {
    /// Sets a custom clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> Monitor<A, O, S, C2, Z> {
        Monitor {
            addresses: self.addresses,
            origins: self.origins,
            store: self.store,
            clock,
            sleeper: self.sleeper,
        }
    }

    /// Sets a custom sleeper.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<Z2>(self, sleeper: Z2) -> Monitor<A, O, S, C, Z2> {
        Monitor {
            addresses: self.addresses,
            origins: self.origins,
            store: self.store,
            clock: self.clock,
            sleeper,
        }
    }
}

impl<A, O, S, C, Z> Monitor<A, O, S, C, Z>
where
    A: AddressLookup,
    O: OriginLookup,
    S: HistoryStore,
    C: Clock,
    Z: Sleeper,
{
    /// Runs one check cycle.
    ///
    /// Resolves the address and its origin, compares the result with the
    /// last stored observation and appends it when anything changed. A
    /// failed save is logged and reported through
    /// [`CheckReport::persisted`]; it does not fail the check.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if no address provider could report an address.
    pub async fn check(&self) -> Result<CheckReport, LookupError> {
        let address = match self.addresses.lookup().await {
            Ok(address) => address,
            Err(e) => {
                tracing::error!("Could not determine public address: {e}");
                return Err(e);
            }
        };

        let origin = self.origins.lookup(&address).await.unwrap_or_else(|| {
            tracing::warn!("Could not determine location of {address}");
            Origin::unknown()
        });

        let mut history = self.load_history();
        let observation = Observation::at(self.clock.now(), address, origin);
        let change = classify(history.last(), &observation);
        log_change(&change, &observation);

        let mut persisted = false;
        if change.requires_append() {
            history.push(observation.clone());
            match self.store.save(&history).await {
                Ok(()) => persisted = true,
                Err(e) => tracing::error!("Failed to save history: {e}"),
            }
        }

        Ok(CheckReport {
            observation,
            change,
            persisted,
        })
    }

    /// Runs exactly one check and returns whether an address was acquired.
    pub async fn run_once(&self) -> bool {
        tracing::info!("Starting IP check...");
        let succeeded = self.check().await.is_ok();
        if succeeded {
            tracing::info!("Check complete");
        }
        succeeded
    }

    /// Runs checks until `shutdown` completes.
    ///
    /// Waits `interval` after the end of each check before starting the
    /// next one. A failed check is logged and the loop carries on. The
    /// shutdown future is observed both while checking and while waiting.
    pub async fn run_continuous<F>(&self, interval: Duration, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        if interval < RATE_LIMIT_FLOOR {
            tracing::warn!(
                "Check interval of {}s is below {}s and may trigger provider rate limits",
                interval.as_secs(),
                RATE_LIMIT_FLOOR.as_secs()
            );
        }
        tracing::info!(
            "Starting continuous monitoring, interval: {}s",
            interval.as_secs()
        );

        let mut summary = RunSummary::default();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => break,

                result = self.check() => summary.record(&result),
            }

            tracing::info!("Waiting {} seconds...", interval.as_secs());
            tokio::select! {
                biased;

                () = &mut shutdown => break,

                () = self.sleeper.sleep(interval) => {}
            }
        }

        tracing::info!(
            "Monitoring stopped by interrupt after {} check(s)",
            summary.cycles
        );
        summary
    }

    fn load_history(&self) -> Vec<Observation> {
        match self.store.load() {
            LoadResult::Loaded(history) => history,
            LoadResult::NotFound => Vec::new(),
            LoadResult::Corrupted { reason } => {
                tracing::debug!("Ignoring unreadable history ({reason})");
                Vec::new()
            }
        }
    }
}

/// Logs the classification and, for appended observations, the new state.
fn log_change(change: &Change, current: &Observation) {
    if matches!(change, Change::FirstObservation) {
        tracing::info!("First observation");
    }
    if let Some(address) = change.address_change() {
        tracing::info!(
            "Public address changed: {} -> {}",
            address.before,
            address.after
        );
    }
    if let Some(origin) = change.origin_change() {
        tracing::info!("Location changed:");
        tracing::info!("  before: {}", origin.before);
        tracing::info!("  after: {}", origin.after);
    }

    if change.requires_append() {
        tracing::info!("Current IP: {}", current.address);
        tracing::info!("Location: {}", current.origin.place());
        tracing::info!("ISP: {}", current.origin.isp);
    } else {
        tracing::info!("IP and location unchanged: {}", current.address);
    }
}
