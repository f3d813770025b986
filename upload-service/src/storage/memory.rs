//! In-memory [`ObjectStore`] used by tests that need to read back what was written.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;

use super::ObjectStore;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct InMemoryStore {
    buckets: Mutex<HashMap<String, HashMap<String, StoredObject>>>,
    fail_puts: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::default();
        store
            .buckets
            .lock()
            .unwrap()
            .insert(bucket.to_string(), HashMap::new());
        store
    }

    /// Every `put_object` fails as if the store rejected the write.
    pub fn failing_puts(bucket: &str) -> Self {
        Self {
            fail_puts: true,
            ..Self::with_bucket(bucket)
        }
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets.lock().unwrap().contains_key(bucket)
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        Ok(self.has_bucket(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let mut buckets = self.buckets.lock().unwrap();
        if buckets.contains_key(bucket) {
            return Err(anyhow!("BucketAlreadyOwnedByYou: {}", bucket));
        }
        buckets.insert(bucket.to_string(), HashMap::new());
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        if self.fail_puts {
            return Err(anyhow!("PutObject rejected: InternalError"));
        }
        let mut buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| anyhow!("NoSuchBucket: {}", bucket))?;
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: (!content_type.is_empty()).then(|| content_type.to_string()),
            },
        );
        Ok(())
    }
}
