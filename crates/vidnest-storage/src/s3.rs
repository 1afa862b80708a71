//! S3 (and S3-compatible) media host backend

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::{Error as ObjectStoreError, ObjectStoreExt, PutPayload};

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

/// Where public asset URLs point.
#[derive(Clone, Debug)]
enum UrlStyle {
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    VirtualHosted { region: String },
    /// `{endpoint}/{bucket}/{key}`, used for MinIO and friends
    PathStyle { endpoint: String },
}

#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    url_style: UrlStyle,
}

impl S3Storage {
    /// Connect to `bucket`. Credentials come from the standard AWS
    /// environment variables; `endpoint_url` switches to an S3-compatible
    /// provider (plain `http://` endpoints are allowed).
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(&region)
            .with_bucket_name(&bucket);

        let url_style = match endpoint_url {
            Some(endpoint) => {
                builder = builder
                    .with_allow_http(endpoint.starts_with("http://"))
                    .with_endpoint(&endpoint);
                UrlStyle::PathStyle {
                    endpoint: endpoint.trim_end_matches('/').to_string(),
                }
            }
            None => UrlStyle::VirtualHosted { region },
        };

        let store = builder
            .build()
            .map_err(|e| StorageError::Misconfigured(format!("Invalid S3 configuration: {}", e)))?;

        tracing::info!(bucket = %bucket, url_style = ?url_style, "S3 media host configured");
        Ok(Self {
            store,
            bucket,
            url_style,
        })
    }

    fn public_url(&self, key: &str) -> String {
        match &self.url_style {
            UrlStyle::VirtualHosted { region } => {
                format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, region, key)
            }
            UrlStyle::PathStyle { endpoint } => format!("{}/{}/{}", endpoint, self.bucket, key),
        }
    }
}

fn object_path(key: &str) -> StorageResult<ObjectPath> {
    ObjectPath::parse(key).map_err(|e| StorageError::InvalidKey(format!("{}: {}", key, e)))
}

#[async_trait]
impl Storage for S3Storage {
    #[tracing::instrument(skip(self, data), fields(bucket = %self.bucket, size_bytes = data.len()))]
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let location = object_path(storage_key)?;
        let started = Instant::now();

        self.store
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "S3 upload failed");
                StorageError::Upload(e.to_string())
            })?;

        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "S3 upload done");
        Ok(self.public_url(storage_key))
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let location = object_path(storage_key)?;

        match self.store.delete(&location).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, "S3 delete failed");
                Err(StorageError::Delete(e.to_string()))
            }
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
