//! Local filesystem media host backend
//!
//! Assets are written below a root directory and the API serves that
//! directory under `/media`, so the returned URL is `{base_url}/{key}`.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create the root directory if needed.
    ///
    /// `base_url` is the public prefix assets are reachable under, e.g.
    /// `http://localhost:4000/media`.
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let root = base_path.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Misconfigured(format!(
                "Cannot create media directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Map a key to a file under the root. Only plain relative components
    /// are accepted, so a key can never leave the root directory.
    fn resolve(&self, storage_key: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(storage_key);
        let plain = !storage_key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(StorageError::InvalidKey(storage_key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let path = self.resolve(storage_key)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await?;
        }

        fs::write(&path, &data).await.map_err(|e| {
            StorageError::Upload(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(key = storage_key, size_bytes = data.len(), "Asset written to disk");
        Ok(format!("{}/{}", self.base_url, storage_key))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.resolve(storage_key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = storage_key, "Asset removed from disk");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Delete(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
