//! Observation history persistence.
//!
//! This module provides abstractions for storing and retrieving the
//! ordered list of accepted [`Observation`]s. The list is logically
//! append-only: callers load it, push one record, and save it back whole.

mod file;
mod report;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileHistoryStore;
pub use report::render_history;

use std::io;

use thiserror::Error;

use crate::observation::Observation;

/// Result of loading history from persistent storage.
///
/// Explicitly models all valid states:
/// - Successfully loaded previous history
/// - No history exists yet (first run)
/// - History exists but is corrupted/unreadable
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// Successfully loaded the stored observations.
    Loaded(Vec<Observation>),

    /// No history file exists.
    NotFound,

    /// History file exists but could not be parsed.
    /// It is treated as empty and overwritten on the next save.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded observations, or an empty vec for `NotFound`/`Corrupted`.
    #[must_use]
    pub fn into_history(self) -> Vec<Observation> {
        match self {
            Self::Loaded(history) => history,
            Self::NotFound | Self::Corrupted { .. } => Vec::new(),
        }
    }
}

/// Errors that can occur while saving history.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Failed to write the history file.
    #[error("Failed to write history file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize history to JSON.
    #[error("Failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The background write task did not complete.
    #[error("History write task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Abstraction for persisting the observation history.
///
/// Implementations should:
/// - Handle missing files gracefully (return `LoadResult::NotFound`)
/// - Degrade gracefully on read errors (return `LoadResult::Corrupted`)
/// - Replace the whole stored sequence on every save
pub trait HistoryStore: Send + Sync {
    /// Loads the stored history.
    fn load(&self) -> LoadResult;

    /// Replaces the stored history with `history`.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    fn save(
        &self,
        history: &[Observation],
    ) -> impl std::future::Future<Output = Result<(), HistoryError>> + Send;
}

/// In-memory history store for testing.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;

    /// A mock implementation of [`HistoryStore`] for testing.
    ///
    /// Successful saves become visible to later loads, like a real file.
    #[derive(Debug)]
    pub struct MockHistoryStore {
        current: RwLock<LoadResult>,
        saves: RwLock<Vec<Vec<Observation>>>,
        fail_saves: bool,
    }

    impl MockHistoryStore {
        fn from_result(result: LoadResult) -> Self {
            Self {
                current: RwLock::new(result),
                saves: RwLock::new(Vec::new()),
                fail_saves: false,
            }
        }

        /// Creates a store that already holds `history`.
        #[must_use]
        pub fn with_history(history: Vec<Observation>) -> Self {
            Self::from_result(LoadResult::Loaded(history))
        }

        /// Creates a store with no history yet.
        #[must_use]
        pub fn not_found() -> Self {
            Self::from_result(LoadResult::NotFound)
        }

        /// Creates a store whose history cannot be parsed.
        #[must_use]
        pub fn corrupted(reason: impl Into<String>) -> Self {
            Self::from_result(LoadResult::Corrupted {
                reason: reason.into(),
            })
        }

        /// Makes every save fail with a write error.
        #[must_use]
        pub const fn failing_saves(mut self) -> Self {
            self.fail_saves = true;
            self
        }

        /// Returns every history passed to a successful save, oldest first.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn saves(&self) -> Vec<Vec<Observation>> {
            self.saves.read().unwrap().clone()
        }

        /// Returns what a load would return now.
        #[must_use]
        pub fn stored(&self) -> Vec<Observation> {
            self.load().into_history()
        }
    }

    impl HistoryStore for MockHistoryStore {
        fn load(&self) -> LoadResult {
            self.current.read().unwrap().clone()
        }

        async fn save(&self, history: &[Observation]) -> Result<(), HistoryError> {
            if self.fail_saves {
                return Err(HistoryError::Write(io::Error::other("disk full")));
            }
            *self.current.write().unwrap() = LoadResult::Loaded(history.to_vec());
            self.saves.write().unwrap().push(history.to_vec());
            Ok(())
        }
    }
}
