//! Run orchestration
//!
//! Locates the backups, pushes each one through the selected destination, and
//! decides what happens to the local copy.
//!
//! Cleanup policy differs by backend. A vault upload deletes the local file
//! only when an archive id came back. A bucket upload deletes it after every
//! attempt, failed or not, unless strict bucket cleanup is switched on.

use std::path::Path;

use crate::backup::{find_backups, remove_backup};
use crate::config::Config;
use crate::history::HistoryRecorder;
use crate::storage::{Destination, UploadOutcome};

/// Per-run counters, logged at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub uploaded: usize,
    pub failed: usize,
    pub removed: usize,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every located backup was processed
    Completed(RunSummary),
    /// The backup directory held nothing to upload
    NoBackups,
    /// The backup directory could not be listed
    Unreadable,
}

impl RunStatus {
    /// Process exit status. Per-file failures never change it.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Completed(_) => 0,
            RunStatus::NoBackups | RunStatus::Unreadable => 1,
        }
    }
}

/// Drives one batch of uploads
pub struct Uploader {
    destination: Destination,
    history: HistoryRecorder,
    strict_bucket_cleanup: bool,
}

impl Uploader {
    pub fn new(destination: Destination, history: HistoryRecorder) -> Self {
        Self {
            destination,
            history,
            strict_bucket_cleanup: false,
        }
    }

    /// Build the uploader for the configured backend
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Destination::from_config(config),
            HistoryRecorder::new(&config.history_file),
        )
        .with_strict_bucket_cleanup(config.strict_bucket_cleanup)
    }

    /// Keep local files whose bucket upload failed
    pub fn with_strict_bucket_cleanup(mut self, strict: bool) -> Self {
        self.strict_bucket_cleanup = strict;
        self
    }

    /// Upload every backup in `backup_dir` matching `backup_ext`
    pub async fn run(&self, backup_dir: &Path, backup_ext: &str) -> RunStatus {
        let backups = match find_backups(backup_dir, backup_ext).await {
            Ok(backups) => backups,
            Err(e) => {
                tracing::error!("{}", e);
                return RunStatus::Unreadable;
            }
        };
        if backups.is_empty() {
            tracing::warn!("No backups in {} found. Exit.", backup_dir.display());
            return RunStatus::NoBackups;
        }

        let mut summary = RunSummary {
            found: backups.len(),
            ..RunSummary::default()
        };

        for backup_file in &backups {
            self.process(backup_file, &mut summary).await;
        }

        tracing::info!(
            "{} backups found, {} uploaded, {} failed, {} removed",
            summary.found,
            summary.uploaded,
            summary.failed,
            summary.removed
        );
        RunStatus::Completed(summary)
    }

    async fn process(&self, backup_file: &Path, summary: &mut RunSummary) {
        let target = self.destination.target_name();

        let release = match self.destination.upload(backup_file).await {
            UploadOutcome::Archived(record) => {
                summary.uploaded += 1;
                if let Err(e) = self.history.record(&record).await {
                    tracing::error!("Archive {} not recorded: {}", record.archive_id, e);
                }
                tracing::info!("File {} added to {}", backup_file.display(), target);
                true
            }
            UploadOutcome::Stored { .. } => {
                summary.uploaded += 1;
                tracing::info!("File {} added to {}", backup_file.display(), target);
                true
            }
            UploadOutcome::StoreFailed { .. } if self.strict_bucket_cleanup => {
                summary.failed += 1;
                tracing::error!("File {} kept after failed upload", backup_file.display());
                false
            }
            UploadOutcome::StoreFailed { .. } => {
                summary.failed += 1;
                // The bucket path historically ignores upload failures.
                tracing::info!("File {} added to {}", backup_file.display(), target);
                true
            }
            UploadOutcome::Skipped => {
                summary.failed += 1;
                false
            }
        };

        if release && remove_backup(backup_file).await {
            summary.removed += 1;
        }
    }
}
