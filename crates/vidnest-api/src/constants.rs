//! API constants

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Versioned prefix every resource route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Cookie that carries the access token for browser clients.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Mount point for files written by the local storage backend.
pub const LOCAL_MEDIA_ROUTE: &str = "/media";

/// Multipart field names of the publish and thumbnail forms.
pub const VIDEO_FILE_FIELD: &str = "videoFile";
pub const THUMBNAIL_FIELD: &str = "thumbnail";
