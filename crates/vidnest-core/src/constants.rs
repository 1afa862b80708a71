//! Shared constants

/// Default page number for paginated listings.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size for paginated listings.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a client may ask for.
pub const MAX_LIMIT: u32 = 100;

/// Key prefix under which uploaded video assets are stored.
pub const VIDEO_ASSET_PREFIX: &str = "videos";

/// Key prefix under which uploaded image assets (thumbnails) are stored.
pub const IMAGE_ASSET_PREFIX: &str = "images";

/// Generic message returned when a mutation matched no record.
pub const DB_OPERATION_FAILED: &str = "Something went wrong while db operation";
