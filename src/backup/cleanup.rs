//! Local cleanup of uploaded backups

use std::path::Path;

/// Remove a backup file after it was uploaded.
///
/// Returns `true` when the file was deleted. A missing file or a failed
/// delete is logged and reported as `false`; neither stops the run.
pub async fn remove_backup(file_name: &Path) -> bool {
    tracing::debug!("Trying to remove file {}", file_name.display());

    let is_file = tokio::fs::metadata(file_name)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        tracing::error!("File {} not found", file_name.display());
        return false;
    }

    match tokio::fs::remove_file(file_name).await {
        Ok(()) => {
            tracing::debug!("File {} removed", file_name.display());
            true
        }
        Err(e) => {
            tracing::error!("Failed to remove {}: {}", file_name.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_removes_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.back.7z");
        std::fs::write(&path, b"data").unwrap();

        assert!(remove_backup(&path).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.back.7z");

        assert!(!remove_backup(&path).await);
    }

    #[tokio::test]
    async fn test_directory_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dir.back.7z");
        std::fs::create_dir(&path).unwrap();

        assert!(!remove_backup(&path).await);
        assert!(path.is_dir());
    }
}
