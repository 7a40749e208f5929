//! S3 blob store
//!
//! Works against AWS S3 and S3-compatible endpoints such as LocalStack or MinIO.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};

use crate::{public_url, validate_path, BlobStore, StorageConfig, StorageError};

pub struct S3BlobStore {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub async fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let bucket = config
            .bucket
            .ok_or_else(|| StorageError::Configuration("S3_BUCKET is required".to_string()))?;

        let region = config
            .aws_region
            .unwrap_or_else(|| "eu-central-1".to_string());

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            tracing::info!(endpoint = %endpoint, "Using custom S3 endpoint");
            loader = loader
                .endpoint_url(endpoint)
                .credentials_provider(aws_credential_types::Credentials::new(
                    "test", "test", None, None, "localstack",
                ));
        }

        let sdk_config = loader.load().await;

        // Custom endpoints generally do not support virtual-host style buckets
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.aws_endpoint_url.is_some())
            .build();

        let public_base_url = match (config.public_base_url, &config.aws_endpoint_url) {
            (Some(base), _) => base,
            (None, Some(endpoint)) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            (None, None) => format!("https://{bucket}.s3.{region}.amazonaws.com"),
        };

        tracing::info!(bucket = %bucket, region = %region, "S3 blob store initialized");

        Ok(Self {
            client: S3Client::from_conf(s3_config),
            bucket,
            public_base_url,
        })
    }
}

#[async_trait::async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        validate_path(path)?;

        let size = body.len();
        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(body));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(|e| {
            tracing::error!(path, bucket = %self.bucket, error = %e, "S3 upload failed");
            StorageError::Upload(e.to_string())
        })?;

        tracing::info!(path, bytes = size, "Uploaded blob to S3");

        Ok(public_url(&self.public_base_url, path))
    }

    fn provider_name(&self) -> &'static str {
        "s3"
    }
}
