//! Shared key generation for storage backends.
//!
//! Key format: `{prefix}/{uuid}.{ext}` where the prefix encodes the asset kind.

use uuid::Uuid;
use vidnest_core::constants::{IMAGE_ASSET_PREFIX, VIDEO_ASSET_PREFIX};

/// The two kinds of assets the media host keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Video,
    Image,
}

impl AssetKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Video => VIDEO_ASSET_PREFIX,
            AssetKind::Image => IMAGE_ASSET_PREFIX,
        }
    }

    /// Whether `public_id` names an asset of this kind.
    pub fn owns(&self, public_id: &str) -> bool {
        public_id
            .strip_prefix(self.prefix())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Generate a fresh storage key for an asset, keeping the original extension.
pub fn generate_storage_key(kind: AssetKind, original_filename: &str) -> String {
    let extension = std::path::Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}/{}.{}", kind.prefix(), Uuid::new_v4(), ext),
        None => format!("{}/{}", kind.prefix(), Uuid::new_v4()),
    }
}
