//! Storage module for the two AWS backends
//!
//! Supports AWS Glacier vaults and S3-compatible buckets.

mod destination;
mod glacier_client;
mod s3_client;
mod types;

pub use destination::{
    upload_to_bucket, upload_to_vault, ArchiveReceipt, BucketApi, Destination, VaultApi,
};
pub use glacier_client::GlacierClient;
pub use s3_client::S3Client;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory stand-ins for the AWS clients

    use async_trait::async_trait;
    use aws_sdk_glacier::primitives::ByteStream;
    use std::sync::Mutex;

    use super::{ArchiveReceipt, BucketApi, VaultApi};
    use crate::error::StorageError;

    async fn drain(body: ByteStream) -> Vec<u8> {
        body.collect().await.unwrap().into_bytes().to_vec()
    }

    pub struct FakeVault {
        archive_id: Option<String>,
        bodies: Mutex<Vec<Vec<u8>>>,
        descriptions: Mutex<Vec<Option<String>>>,
    }

    impl FakeVault {
        pub fn accepting(archive_id: &str) -> Self {
            Self {
                archive_id: Some(archive_id.to_string()),
                bodies: Mutex::new(Vec::new()),
                descriptions: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                archive_id: None,
                bodies: Mutex::new(Vec::new()),
                descriptions: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.descriptions.lock().unwrap().len()
        }

        pub fn bodies(&self) -> Vec<Vec<u8>> {
            self.bodies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VaultApi for FakeVault {
        fn vault(&self) -> &str {
            "test-vault"
        }

        async fn upload_archive(
            &self,
            description: Option<String>,
            body: ByteStream,
        ) -> Result<ArchiveReceipt, StorageError> {
            self.descriptions.lock().unwrap().push(description);
            let data = drain(body).await;

            match &self.archive_id {
                Some(archive_id) => {
                    self.bodies.lock().unwrap().push(data);
                    Ok(ArchiveReceipt {
                        archive_id: archive_id.clone(),
                        checksum: None,
                        location: None,
                    })
                }
                None => Err(StorageError::SdkError("ResourceNotFoundException".to_string())),
            }
        }
    }

    pub struct FakeBucket {
        fail: bool,
        keys: Mutex<Vec<String>>,
    }

    impl FakeBucket {
        pub fn accepting() -> Self {
            Self {
                fail: false,
                keys: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                keys: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.keys.lock().unwrap().len()
        }

        pub fn keys(&self) -> Vec<String> {
            self.keys.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BucketApi for FakeBucket {
        fn bucket(&self) -> &str {
            "test-bucket"
        }

        async fn put_object(&self, key: &str, body: ByteStream) -> Result<(), StorageError> {
            self.keys.lock().unwrap().push(key.to_string());
            drain(body).await;

            if self.fail {
                Err(StorageError::SdkError("NoSuchBucket".to_string()))
            } else {
                Ok(())
            }
        }
    }
}
