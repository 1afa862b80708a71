//! The [`Storage`] trait every media backend implements

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not store asset: {0}")]
    Upload(String),

    #[error("could not remove asset: {0}")]
    Delete(String),

    /// Key is empty, absolute, or escapes the backend root.
    #[error("invalid asset key: {0}")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("media backend misconfigured: {0}")]
    Misconfigured(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Byte sink for media assets. Keys come from [`crate::AssetKind`] and are
/// unique per upload, so backends never overwrite.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `storage_key` and return the URL clients fetch it from.
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String>;

    /// Remove an asset. Removing an absent key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    fn backend_type(&self) -> StorageBackend;
}
