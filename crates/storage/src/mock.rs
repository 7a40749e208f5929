//! In-memory blob store
//!
//! Keeps uploaded objects in memory so tests can assert on what was written.
//! Can be switched into a failing mode to exercise upload outages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::{public_url, validate_path, BlobStore, StorageError};

const DEFAULT_BASE_URL: &str = "mock://blobs";

/// Object stored by the mock
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MockBlobStore {
    blobs: Arc<Mutex<HashMap<String, StoredBlob>>>,
    failing: Arc<AtomicBool>,
    base_url: String,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            blobs: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
            base_url: base_url.into(),
        }
    }

    /// Make every subsequent upload fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, path: &str) -> Option<StoredBlob> {
        self.blobs
            .lock()
            .expect("blobs lock poisoned by a prior panic")
            .get(path)
            .cloned()
    }

    /// Stored paths in lexical order
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .blobs
            .lock()
            .expect("blobs lock poisoned by a prior panic")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }

    pub fn blob_count(&self) -> usize {
        self.blobs
            .lock()
            .expect("blobs lock poisoned by a prior panic")
            .len()
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BlobStore for MockBlobStore {
    async fn put(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        validate_path(path)?;

        if self.failing.load(Ordering::SeqCst) {
            tracing::warn!(path, "Mock blob store in failing mode");
            return Err(StorageError::Upload(
                "mock provider configured to fail".to_string(),
            ));
        }

        tracing::debug!(path, bytes = body.len(), "Mock blob store capturing upload");

        let blob = StoredBlob {
            path: path.to_string(),
            content_type: content_type.map(str::to_string),
            body,
            stored_at: Utc::now(),
        };

        self.blobs
            .lock()
            .map_err(|e| StorageError::Upload(format!("blobs lock poisoned: {e}")))?
            .insert(path.to_string(), blob);

        Ok(public_url(&self.base_url, path))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
