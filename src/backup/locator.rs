//! Backup locator
//!
//! Lists the immediate entries of the backup directory whose names end with
//! the configured extension.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Find all backups in `backup_dir` whose file name ends with `backup_ext`.
///
/// An empty extension matches every entry. The scan does not descend into
/// subdirectories. Iteration order of the returned set carries no meaning.
pub async fn find_backups(backup_dir: &Path, backup_ext: &str) -> Result<BTreeSet<PathBuf>> {
    let dir_error = |source: std::io::Error| AppError::BackupDir {
        path: backup_dir.to_path_buf(),
        source,
    };

    let mut backups = BTreeSet::new();
    let mut entries = tokio::fs::read_dir(backup_dir).await.map_err(dir_error)?;

    while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
        let file_name = entry.file_name();
        if backup_ext.is_empty() || file_name.to_string_lossy().ends_with(backup_ext) {
            let backup_file = backup_dir.join(&file_name);
            tracing::debug!("Backup file {} added.", backup_file.display());
            backups.insert(backup_file);
        }
    }

    Ok(backups)
}
