use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner: Uuid,
    /// Ordered, without duplicates.
    pub videos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPlaylist {
    pub name: String,
    pub description: Option<String>,
    pub owner: Uuid,
}

/// Create body. Only `name` is mandatory.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    #[validate(
        required(message = "Name field is required"),
        length(min = 1, message = "Name field is required")
    )]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Update body. Unlike creation, both fields are mandatory here.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    #[validate(
        required(message = "name and description field is required"),
        length(min = 1, message = "name and description field is required")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "name and description field is required"),
        length(min = 1, message = "name and description field is required")
    )]
    pub description: Option<String>,
}
