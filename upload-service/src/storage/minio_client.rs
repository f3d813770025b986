//! MinIO client bootstrap
//!
//! Builds an S3 client for a MinIO (or other S3-compatible) endpoint, makes
//! sure the target bucket exists and hands back a [`StorageHandle`] that the
//! rest of the service shares read-only.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion};
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client,
};
use bytes::Bytes;
use tracing::{debug, error, info};

use super::{ObjectStore, StorageError};

/// Region S3 treats as the default; buckets there take no location constraint.
const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for the object store
#[derive(Clone)]
pub struct MinioSettings {
    /// `host:port`, without scheme
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub use_ssl: bool,
    pub bucket_name: String,
    pub region: String,
}

impl MinioSettings {
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.endpoint)
    }
}

impl fmt::Debug for MinioSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinioSettings")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("use_ssl", &self.use_ssl)
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .finish()
    }
}

/// A validated, ready-to-use connection to the object store.
///
/// Immutable after construction; clone it freely or share it behind an `Arc`.
#[derive(Clone)]
pub struct StorageHandle {
    store: Arc<dyn ObjectStore>,
    settings: MinioSettings,
}

impl StorageHandle {
    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn settings(&self) -> &MinioSettings {
        &self.settings
    }

    pub fn bucket(&self) -> &str {
        &self.settings.bucket_name
    }
}

impl fmt::Debug for StorageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageHandle")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// [`ObjectStore`] backed by `aws-sdk-s3`
pub struct S3ObjectStore {
    client: Client,
    region: String,
}

impl S3ObjectStore {
    /// Build the client. Nothing is sent over the network here.
    pub async fn connect(settings: &MinioSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key.clone(),
            settings.secret_key.clone(),
            None,
            None,
            "minio-static",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint_url())
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        // MinIO serves buckets as path segments, not virtual hosts.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            region: settings.region.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    return Ok(false);
                }
                Err(anyhow!(
                    "HeadBucket failed for '{}': {}",
                    bucket,
                    DisplayErrorContext(&err)
                ))
            }
        }
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let mut request = self.client.create_bucket().bucket(bucket);

        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        request.send().await.map_err(|err| {
            anyhow!(
                "CreateBucket failed for '{}': {}",
                bucket,
                DisplayErrorContext(&err)
            )
        })?;

        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        debug!("Putting object {}/{} ({} bytes)", bucket, key, data.len());

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(data.len() as i64)
            .body(ByteStream::from(data));

        if !content_type.is_empty() {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(|err| {
            anyhow!(
                "PutObject failed for '{}/{}': {}",
                bucket,
                key,
                DisplayErrorContext(&err)
            )
        })?;

        Ok(())
    }
}

/// Ensure the configured bucket exists on `store` and wrap it in a handle.
pub async fn bootstrap(
    store: Arc<dyn ObjectStore>,
    settings: MinioSettings,
) -> Result<StorageHandle, StorageError> {
    let bucket = settings.bucket_name.as_str();

    let exists = store
        .bucket_exists(bucket)
        .await
        .map_err(|e| StorageError::Unavailable(format!("{:#}", e)))?;

    if exists {
        info!("Bucket '{}' already exists in MinIO", bucket);
    } else {
        info!("Bucket '{}' not found. Creating it now", bucket);
        store
            .make_bucket(bucket)
            .await
            .map_err(|e| StorageError::Unavailable(format!("{:#}", e)))?;
    }

    Ok(StorageHandle { store, settings })
}

/// Connect to the configured endpoint and ensure the bucket exists.
pub async fn try_initialize(settings: MinioSettings) -> Result<StorageHandle, StorageError> {
    info!(
        "Attempting to initialize MinIO client for endpoint: {}",
        settings.endpoint
    );

    let store = S3ObjectStore::connect(&settings).await;
    let handle = bootstrap(Arc::new(store), settings).await?;

    info!(
        "MinIO client initialized successfully for endpoint: {}",
        handle.settings().endpoint
    );
    Ok(handle)
}

/// Like [`try_initialize`], but a failure is logged and becomes `None` so the
/// service can keep running without storage.
pub async fn initialize(settings: MinioSettings) -> Option<StorageHandle> {
    match try_initialize(settings).await {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("MinIO client initialization failed: {}", e);
            None
        }
    }
}
