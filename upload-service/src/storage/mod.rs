//! Object storage integration (MinIO / any S3-compatible service)
//!
//! Startup builds at most one [`StorageHandle`]; every upload borrows it.
//! A missing handle is a normal state: uploads then fail fast with
//! [`StorageError::Unavailable`].

pub mod minio_client;
pub mod upload;

#[cfg(test)]
pub mod memory;

pub use minio_client::{initialize, MinioSettings, StorageHandle};
pub use upload::{upload_file, FileUpload};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use shared::CommonError;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Bootstrap failed or never ran; no usable handle exists.
    #[error("Object storage unavailable: {0}")]
    Unavailable(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

impl StorageError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::UploadFailed(_))
    }
}

impl From<StorageError> for CommonError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => CommonError::ServiceUnavailable(msg),
            StorageError::UploadFailed(msg) => CommonError::ExternalService(msg),
        }
    }
}

/// The three bucket/object calls the service needs from a store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `Ok(false)` only when the store positively answers "no such bucket".
    async fn bucket_exists(&self, bucket: &str) -> anyhow::Result<bool>;

    async fn make_bucket(&self, bucket: &str) -> anyhow::Result<()>;

    /// Write `data` under `key`. An empty `content_type` leaves the store default.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()>;
}
