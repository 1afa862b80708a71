//! Media host facade
//!
//! Handlers never talk to a [`Storage`] directly. They stage an uploaded file
//! on local disk, hand it to [`MediaHost::upload`] together with the
//! [`AssetKind`] the form field stands for, and later delete the asset by its
//! public id. Upload failures are reported as `None` rather than as
//! errors; delete failures are logged and swallowed.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tempfile::NamedTempFile;
use vidnest_core::models::MediaAsset;

use crate::keys::{generate_storage_key, AssetKind};
use crate::traits::Storage;
use crate::StorageBackend;

/// An uploaded file written to a temporary local path.
///
/// The file is removed when the value is dropped.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    file_name: String,
    content_type: String,
    size: u64,
}

impl StagedFile {
    pub fn new(file: NamedTempFile, file_name: String, content_type: String, size: u64) -> Self {
        Self {
            file,
            file_name,
            content_type,
            size,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Clone)]
pub struct MediaHost {
    storage: Arc<dyn Storage>,
}

impl MediaHost {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.storage.backend_type()
    }

    /// Upload a staged file as an asset of `kind`. The client's content type
    /// is passed through to the backend but never decides the kind.
    ///
    /// `None` means nothing was stored: no file was given, it could not be
    /// read, or the backend refused it.
    #[tracing::instrument(skip_all, fields(kind = ?kind))]
    pub async fn upload(&self, kind: AssetKind, file: Option<&StagedFile>) -> Option<MediaAsset> {
        let file = file?;

        let data = match tokio::fs::read(file.path()).await {
            Ok(data) => Bytes::from(data),
            Err(e) => {
                tracing::error!(error = %e, path = %file.path().display(), "Failed to read staged upload");
                return None;
            }
        };

        let key = generate_storage_key(kind, file.file_name());

        match self.storage.upload(&key, file.content_type(), data).await {
            Ok(url) => {
                tracing::debug!(public_id = %key, size_bytes = file.size(), "Asset uploaded");
                Some(MediaAsset::new(key, url))
            }
            Err(e) => {
                tracing::error!(error = %e, public_id = %key, "Asset upload failed");
                None
            }
        }
    }

    /// Delete a video asset. Returns whether anything was deleted.
    pub async fn delete_video_asset(&self, public_id: Option<&str>) -> bool {
        self.delete_asset(AssetKind::Video, public_id).await
    }

    /// Delete an image asset. Returns whether anything was deleted.
    pub async fn delete_image_asset(&self, public_id: Option<&str>) -> bool {
        self.delete_asset(AssetKind::Image, public_id).await
    }

    async fn delete_asset(&self, kind: AssetKind, public_id: Option<&str>) -> bool {
        let Some(public_id) = public_id else {
            tracing::warn!(?kind, "Asset delete requested without a public id");
            return false;
        };
        if !kind.owns(public_id) {
            tracing::warn!(?kind, public_id, "Public id does not name an asset of this kind");
            return false;
        }

        match self.storage.delete(public_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, public_id, "Asset delete failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{stage_bytes, MockStorage};

    #[tokio::test]
    async fn upload_missing_file_yields_none() {
        let host = MediaHost::new(Arc::new(MockStorage::new()));
        assert!(host.upload(AssetKind::Video, None).await.is_none());
    }

    #[tokio::test]
    async fn upload_keys_by_requested_kind() {
        let storage = Arc::new(MockStorage::new());
        let host = MediaHost::new(storage.clone());

        let video = stage_bytes("clip.mp4", "video/mp4", b"frames");
        let asset = host.upload(AssetKind::Video, Some(&video)).await.unwrap();
        assert!(asset.public_id.starts_with("videos/"));
        assert!(asset.url.ends_with(&asset.public_id));
        assert_eq!(storage.get_file(&asset.public_id).unwrap(), b"frames");

        let image = stage_bytes("thumb.png", "image/png", b"pixels");
        let asset = host.upload(AssetKind::Image, Some(&image)).await.unwrap();
        assert!(asset.public_id.starts_with("images/"));
    }

    #[tokio::test]
    async fn generic_content_type_still_lands_under_requested_kind() {
        let storage = Arc::new(MockStorage::new());
        let host = MediaHost::new(storage.clone());

        let video = stage_bytes("clip.mp4", "application/octet-stream", b"frames");
        let asset = host.upload(AssetKind::Video, Some(&video)).await.unwrap();
        assert!(asset.public_id.starts_with("videos/"));

        assert!(host.delete_video_asset(Some(&asset.public_id)).await);
        assert_eq!(storage.file_count(), 0);
    }

    #[tokio::test]
    async fn failed_backend_upload_yields_none() {
        let storage = Arc::new(MockStorage::new());
        storage.fail_uploads_under("images/");
        let host = MediaHost::new(storage.clone());

        let image = stage_bytes("thumb.png", "image/png", b"pixels");
        assert!(host.upload(AssetKind::Image, Some(&image)).await.is_none());
        assert_eq!(storage.file_count(), 0);
    }

    #[tokio::test]
    async fn delete_checks_kind_and_presence() {
        let storage = Arc::new(MockStorage::new());
        storage.set_file("videos/a.mp4", b"v".to_vec());
        let host = MediaHost::new(storage.clone());

        assert!(!host.delete_video_asset(None).await);
        assert!(!host.delete_image_asset(Some("videos/a.mp4")).await);
        assert!(storage.has_file("videos/a.mp4"));

        assert!(host.delete_video_asset(Some("videos/a.mp4")).await);
        assert!(!storage.has_file("videos/a.mp4"));
    }
}
