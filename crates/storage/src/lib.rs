//! Lindenau Blob Storage
//!
//! Stores uploaded artwork images and hands back a publicly retrievable URL:
//! - S3 (or any S3-compatible endpoint) for production
//! - In-memory mock for tests and local development

use thiserror::Error;

pub mod mock;
pub mod s3;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Configuration(String),

    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Blob storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider (s3, mock)
    pub provider: String,
    pub bucket: Option<String>,
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack / MinIO)
    pub aws_endpoint_url: Option<String>,
    /// Prefix joined with the blob path to form public URLs
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Create storage config from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            provider: std::env::var("BLOB_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            bucket: std::env::var("S3_BUCKET").ok(),
            aws_region: std::env::var("AWS_REGION").ok(),
            aws_endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            public_base_url: std::env::var("BLOB_PUBLIC_BASE_URL").ok(),
        })
    }
}

/// Content-addressable-by-path object storage with public URLs
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `body` under `path` and return its public URL.
    /// Writing to an existing path replaces the object.
    async fn put(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    fn provider_name(&self) -> &'static str;
}

/// Reject paths that could escape the bucket prefix or produce odd URLs
pub fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() || path.starts_with('/') {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Join a base URL and a blob path with exactly one slash
pub fn public_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Guess a MIME type from a file extension
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Blob store factory
pub struct BlobStoreFactory;

impl BlobStoreFactory {
    /// Create a blob store based on configuration
    pub async fn create(config: StorageConfig) -> Result<Box<dyn BlobStore>, StorageError> {
        match config.provider.as_str() {
            "s3" => {
                tracing::info!("Creating S3 blob store");
                Ok(Box::new(s3::S3BlobStore::new(config).await?))
            }
            "mock" => {
                tracing::info!("Creating in-memory blob store");
                let store = match config.public_base_url {
                    Some(base) => mock::MockBlobStore::with_base_url(base),
                    None => mock::MockBlobStore::new(),
                };
                Ok(Box::new(store))
            }
            provider => Err(StorageError::Configuration(format!(
                "Unknown blob provider: {}. Supported providers: s3, mock",
                provider
            ))),
        }
    }
}
