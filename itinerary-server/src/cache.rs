//! Disk cache for decoded itinerary rows.
//!
//! Each line gets one snapshot file named after the line identifier, holding
//! the decoded rows as a JSON array of 7-element string arrays. Snapshots are
//! written lazily after a remote fetch and never expired here; any cleanup
//! happens outside this process.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{LineId, RawRow};

/// Default cache directory.
const DEFAULT_DIR: &str = "/tmp/itinerary/cache";

/// Error from writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Snapshot could not be persisted
    #[error("failed to persist snapshot for line {line}: {message}")]
    Persist { line: LineId, message: String },
}

/// Configuration for the snapshot cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding one snapshot file per line.
    pub dir: PathBuf,
}

impl CacheConfig {
    /// Create a new cache config rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DIR)
    }
}

/// Disk cache of per-line row snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    config: CacheConfig,
}

impl SnapshotCache {
    /// Create a new snapshot cache with the given config.
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Path of the snapshot file for a line.
    pub fn path_for(&self, line: &LineId) -> PathBuf {
        self.config.dir.join(line.as_str())
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Try to load the rows for a line.
    ///
    /// Returns `None` if the snapshot doesn't exist, can't be read, or
    /// doesn't parse. Callers treat all of these as a miss.
    pub async fn load(&self, line: &LineId) -> Option<Vec<RawRow>> {
        let path = self.path_for(line);

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                debug!(%line, path = %path.display(), error = %e, "no readable snapshot");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(rows) => Some(rows),
            Err(e) => {
                debug!(%line, path = %path.display(), error = %e, "corrupt snapshot");
                None
            }
        }
    }

    /// Save the rows for a line.
    ///
    /// Creates the cache directory if it doesn't exist. Concurrent saves for
    /// the same line race; the last write wins.
    pub async fn save(&self, line: &LineId, rows: &[RawRow]) -> Result<(), CacheError> {
        let persist_err = |message: String| CacheError::Persist {
            line: line.clone(),
            message,
        };

        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| persist_err(format!("failed to create cache directory: {}", e)))?;

        let json = serde_json::to_string(rows)
            .map_err(|e| persist_err(format!("failed to serialize rows: {}", e)))?;

        tokio::fs::write(self.path_for(line), json)
            .await
            .map_err(|e| persist_err(format!("failed to write snapshot: {}", e)))?;

        Ok(())
    }
}
