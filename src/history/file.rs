//! File-based history persistence implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::observation::Observation;

use super::{HistoryError, HistoryStore, LoadResult};

/// File-based implementation of [`HistoryStore`].
///
/// Stores the history as a pretty-printed JSON array so it stays readable
/// and editable by hand.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A crash mid-write leaves the previous snapshot in place.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Creates a new file-based history store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Performs the blocking save operation.
    fn save_blocking(path: &Path, history: &[Observation]) -> Result<(), HistoryError> {
        let content = serde_json::to_string_pretty(history).map_err(HistoryError::Serialize)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(HistoryError::Write)?;
            }
        }

        // history.json -> history.json.tmp, not history.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(HistoryError::Write)?;
        std::fs::rename(&temp_path, path).map_err(HistoryError::Write)?;

        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match serde_json::from_str::<Vec<Observation>>(&content) {
            Ok(history) => LoadResult::Loaded(history),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid JSON: {e}"),
            },
        }
    }

    async fn save(&self, history: &[Observation]) -> Result<(), HistoryError> {
        let path = self.path.clone();
        let history = history.to_vec();

        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &history))
            .await
            .map_err(HistoryError::Task)?
    }
}
