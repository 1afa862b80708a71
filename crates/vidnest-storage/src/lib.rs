//! Vidnest Storage Library
//!
//! The media host behind video and thumbnail uploads: a [`Storage`] trait with
//! S3 and local filesystem backends, and [`MediaHost`], the upload/delete
//! facade the API handlers call.
//!
//! # Storage key format
//!
//! Keys double as the public id of an asset:
//!
//! - **Videos**: `videos/{uuid}.{ext}`
//! - **Images**: `images/{uuid}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod media_host;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::AssetKind;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use media_host::{MediaHost, StagedFile};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use vidnest_core::StorageBackend;
