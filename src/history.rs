//! Upload history
//!
//! Append-only JSON-lines log of archives stored in the vault. The program
//! never reads it back.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::ArchiveRecord;

/// Appends archive records to the history file
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    path: PathBuf,
}

impl HistoryRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSON line
    pub async fn record(&self, archive: &ArchiveRecord) -> Result<()> {
        let mut line = serde_json::to_vec(archive)?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                AppError::History(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        file.write_all(&line).await?;
        file.flush().await?;

        tracing::debug!(
            "Archive {} recorded in {}",
            archive.archive_id,
            self.path().display()
        );
        Ok(())
    }
}
