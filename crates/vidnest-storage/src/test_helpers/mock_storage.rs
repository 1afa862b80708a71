use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{StagedFile, Storage, StorageBackend, StorageError, StorageResult};

pub const MOCK_BASE_URL: &str = "https://example.com";

#[derive(Default)]
struct Bucket {
    objects: HashMap<String, Vec<u8>>,
    reject_prefix: Option<String>,
}

/// In-memory media host. Clones share the same bucket.
#[derive(Clone, Default)]
pub struct MockStorage {
    bucket: Arc<Mutex<Bucket>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self) -> MutexGuard<'_, Bucket> {
        self.bucket.lock().unwrap()
    }

    /// Refuse every upload whose key starts with `prefix` (e.g. `"videos/"`).
    pub fn fail_uploads_under(&self, prefix: &str) {
        self.bucket().reject_prefix = Some(prefix.to_string());
    }

    pub fn set_file(&self, key: &str, data: Vec<u8>) {
        self.bucket().objects.insert(key.to_string(), data);
    }

    pub fn has_file(&self, key: &str) -> bool {
        self.bucket().objects.contains_key(key)
    }

    pub fn get_file(&self, key: &str) -> Option<Vec<u8>> {
        self.bucket().objects.get(key).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.bucket().objects.len()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let mut bucket = self.bucket();
        let rejected = bucket
            .reject_prefix
            .as_deref()
            .is_some_and(|prefix| storage_key.starts_with(prefix));
        if rejected {
            return Err(StorageError::Upload(format!("{storage_key} refused")));
        }

        bucket.objects.insert(storage_key.to_string(), data.to_vec());
        Ok(format!("{MOCK_BASE_URL}/{storage_key}"))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.bucket().objects.remove(storage_key);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Stage `data` the way the multipart reader would.
pub fn stage_bytes(file_name: &str, content_type: &str, data: &[u8]) -> StagedFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    StagedFile::new(
        file,
        file_name.to_string(),
        content_type.to_string(),
        data.len() as u64,
    )
}
