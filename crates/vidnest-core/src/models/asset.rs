use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A file held by the media host: its identifier and public retrieval URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MediaAsset {
    pub public_id: String,
    pub url: String,
}

impl MediaAsset {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
        }
    }
}
