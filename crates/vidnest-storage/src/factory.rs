use std::sync::Arc;

use vidnest_core::Config;

#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};

fn setting<'a>(value: Option<&'a str>, name: &str) -> StorageResult<&'a str> {
    value.ok_or_else(|| StorageError::Misconfigured(format!("{name} not configured")))
}

#[cfg(not(all(feature = "storage-s3", feature = "storage-local")))]
fn compiled_out(backend: StorageBackend) -> StorageError {
    StorageError::Misconfigured(format!(
        "the {backend} media backend is not compiled in (enable the storage-{backend} feature)"
    ))
}

/// Build the media backend selected by `STORAGE_BACKEND` (local when unset).
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config.storage_backend().unwrap_or(StorageBackend::Local)
    {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = setting(config.s3_bucket(), "S3_BUCKET")?;
            let region = setting(config.s3_region(), "S3_REGION or AWS_REGION")?;
            Arc::new(
                S3Storage::new(
                    bucket.to_string(),
                    region.to_string(),
                    config.s3_endpoint().map(str::to_string),
                )
                .await?,
            )
        }

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let root = setting(config.local_storage_path(), "LOCAL_STORAGE_PATH")?;
            let base_url = setting(config.local_storage_base_url(), "LOCAL_STORAGE_BASE_URL")?;
            Arc::new(LocalStorage::new(root, base_url.to_string()).await?)
        }

        #[allow(unreachable_patterns)]
        #[cfg(not(all(feature = "storage-s3", feature = "storage-local")))]
        other => return Err(compiled_out(other)),
    };

    Ok(storage)
}
