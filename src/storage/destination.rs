//! Upload destinations
//!
//! The two backends form a closed set: a Glacier vault, which hands back an
//! archive id, and an S3 bucket, which does not. The remote calls sit behind
//! [`VaultApi`] and [`BucketApi`] so the per-file policy can run against any
//! implementation.

use async_trait::async_trait;
use aws_sdk_glacier::primitives::ByteStream;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, UploadMode};
use crate::error::StorageError;

use super::glacier_client::GlacierClient;
use super::s3_client::S3Client;
use super::types::{ArchiveRecord, UploadOutcome, UploadSource};

// ============================================================================
// Remote APIs
// ============================================================================

/// What the vault returns for a stored archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    pub archive_id: String,
    pub checksum: Option<String>,
    pub location: Option<String>,
}

/// Archive vault upload call
#[async_trait]
pub trait VaultApi: Send + Sync {
    fn vault(&self) -> &str;

    async fn upload_archive(
        &self,
        description: Option<String>,
        body: ByteStream,
    ) -> Result<ArchiveReceipt, StorageError>;
}

/// Bucket upload call
#[async_trait]
pub trait BucketApi: Send + Sync {
    fn bucket(&self) -> &str;

    async fn put_object(&self, key: &str, body: ByteStream) -> Result<(), StorageError>;
}

// ============================================================================
// Destination
// ============================================================================

/// The backend selected for this run
#[derive(Clone)]
pub enum Destination {
    Vault(Arc<dyn VaultApi>),
    Bucket(Arc<dyn BucketApi>),
}

impl Destination {
    /// Build the AWS client for the configured mode
    pub fn from_config(config: &Config) -> Self {
        let storage = config.storage();
        match config.mode {
            UploadMode::Glacier => {
                Destination::Vault(Arc::new(GlacierClient::new(&storage, &config.vault_name)))
            }
            UploadMode::S3 => {
                Destination::Bucket(Arc::new(S3Client::new(&storage, &config.bucket_name)))
            }
        }
    }

    /// Vault or bucket name, for log lines
    pub fn target_name(&self) -> &str {
        match self {
            Destination::Vault(api) => api.vault(),
            Destination::Bucket(api) => api.bucket(),
        }
    }

    /// Upload one backup file. Failures are logged, never returned.
    pub async fn upload(&self, backup_file: &Path) -> UploadOutcome {
        match self {
            Destination::Vault(api) => {
                let source = UploadSource::Path(backup_file.to_path_buf());
                match upload_to_vault(api.as_ref(), &source).await {
                    Some(record) => UploadOutcome::Archived(record),
                    None => UploadOutcome::Skipped,
                }
            }
            Destination::Bucket(api) => upload_to_bucket(api.as_ref(), backup_file).await,
        }
    }
}

/// Add an archive to a vault.
///
/// Returns the archive record on success. A source that cannot be read or a
/// rejected upload is logged and yields `None`.
pub async fn upload_to_vault(api: &dyn VaultApi, source: &UploadSource) -> Option<ArchiveRecord> {
    let description = source.description();
    let label = description.as_deref().unwrap_or("<bytes>");

    let body = match source.open().await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Can't open {}: {}", label, e);
            return None;
        }
    };

    match api.upload_archive(description.clone(), body).await {
        Ok(receipt) => Some(ArchiveRecord {
            archive_id: receipt.archive_id,
            description,
            vault: api.vault().to_string(),
            checksum: receipt.checksum,
            location: receipt.location,
            uploaded_at: Utc::now(),
        }),
        Err(e) => {
            tracing::debug!("{}", e);
            tracing::error!("{} was not uploaded to {}", label, api.vault());
            None
        }
    }
}

/// Upload a file to a bucket under its base name.
pub async fn upload_to_bucket(api: &dyn BucketApi, file_name: &Path) -> UploadOutcome {
    let Some(key) = object_key(file_name) else {
        tracing::error!("{}", StorageError::InvalidKey(file_name.to_path_buf()));
        return UploadOutcome::StoreFailed {
            key: file_name.display().to_string(),
        };
    };

    let result = match UploadSource::Path(file_name.to_path_buf()).open().await {
        Ok(body) => api.put_object(&key, body).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => UploadOutcome::Stored { key },
        Err(e) => {
            tracing::debug!("{}", e);
            tracing::error!("{} was not uploaded to {}", key, api.bucket());
            UploadOutcome::StoreFailed { key }
        }
    }
}

/// Object key for a local file: its base name
fn object_key(file_name: &Path) -> Option<String> {
    file_name
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}
