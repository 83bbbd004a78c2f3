//! Storage types

use aws_sdk_glacier::primitives::ByteStream;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::StorageError;

/// Data handed to the archive vault
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// Raw bytes, used as-is
    Bytes(Vec<u8>),
    /// A file that is opened for reading only when the upload starts
    Path(PathBuf),
}

impl UploadSource {
    /// Human-readable label attached to the remote archive
    pub fn description(&self) -> Option<String> {
        match self {
            UploadSource::Bytes(_) => None,
            UploadSource::Path(path) => Some(path.display().to_string()),
        }
    }

    /// Build the request body.
    ///
    /// For `Path` the opened file is owned by the returned stream and closed
    /// when the stream is dropped.
    pub async fn open(&self) -> Result<ByteStream, StorageError> {
        match self {
            UploadSource::Bytes(data) => Ok(ByteStream::from(data.clone())),
            UploadSource::Path(path) => {
                ByteStream::from_path(path)
                    .await
                    .map_err(|e| StorageError::Read {
                        path: path.clone(),
                        source: std::io::Error::other(e),
                    })
            }
        }
    }
}

/// What the vault reported for a stored archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub archive_id: String,
    pub description: Option<String>,
    pub vault: String,
    pub checksum: Option<String>,
    pub location: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of handing one backup to a destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The vault stored the archive
    Archived(ArchiveRecord),
    /// The bucket accepted the object
    Stored { key: String },
    /// The bucket upload was attempted and failed
    StoreFailed { key: String },
    /// Nothing was stored; the local file must stay
    Skipped,
}
