//! AWS Glacier vault client
//!
//! Wraps the AWS SDK `UploadArchive` call.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_glacier::{
    config::{retry::RetryConfig, Credentials, Region},
    primitives::ByteStream,
    Client,
};

use crate::config::StorageConfig;
use crate::error::StorageError;

use super::destination::{ArchiveReceipt, VaultApi};

/// Glacier uses "-" to mean the account owning the credentials
const OWN_ACCOUNT: &str = "-";

/// Glacier vault client
#[derive(Clone)]
pub struct GlacierClient {
    client: Client,
    vault: String,
}

impl GlacierClient {
    /// Create a new Glacier client from configuration
    pub fn new(config: &StorageConfig, vault: impl Into<String>) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "backup-uploader",
        );

        let glacier_config = aws_sdk_glacier::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            client: Client::from_conf(glacier_config),
            vault: vault.into(),
        }
    }
}

#[async_trait]
impl VaultApi for GlacierClient {
    fn vault(&self) -> &str {
        &self.vault
    }

    async fn upload_archive(
        &self,
        description: Option<String>,
        body: ByteStream,
    ) -> Result<ArchiveReceipt, StorageError> {
        let response = self
            .client
            .upload_archive()
            .account_id(OWN_ACCOUNT)
            .vault_name(&self.vault)
            .set_archive_description(description)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                StorageError::SdkError(format!(
                    "Failed to upload archive to {}: {}",
                    self.vault,
                    aws_sdk_glacier::error::DisplayErrorContext(e)
                ))
            })?;

        let archive_id = response
            .archive_id()
            .ok_or(StorageError::MissingArchiveId)?
            .to_string();

        Ok(ArchiveReceipt {
            archive_id,
            checksum: response.checksum().map(|s| s.to_string()),
            location: response.location().map(|s| s.to_string()),
        })
    }
}
