use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::asset::MediaAsset;
use super::user::{ChannelSummary, VideoOwner};

/// Uploaded video as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub video: MediaAsset,
    pub thumbnail: MediaAsset,
    pub title: String,
    pub description: String,
    /// Playback length in seconds, probed once at publish time.
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat database row for [`Video`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRow {
    pub id: Uuid,
    pub video_public_id: String,
    pub video_url: String,
    pub thumbnail_public_id: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Video {
            id: row.id,
            video: MediaAsset::new(row.video_public_id, row.video_url),
            thumbnail: MediaAsset::new(row.thumbnail_public_id, row.thumbnail_url),
            title: row.title,
            description: row.description,
            duration: row.duration,
            views: row.views,
            is_published: row.is_published,
            owner: row.owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields needed to create a [`Video`] once both assets are uploaded.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub video: MediaAsset,
    pub thumbnail: MediaAsset,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub owner: Uuid,
}

/// Text fields of the publish form.
#[derive(Debug, Default, Clone, Validate)]
pub struct PublishVideoFields {
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "All fields are required"),
        length(min = 1, message = "All fields are required")
    )]
    pub description: Option<String>,
}

/// Row of the video feed. The owner stays a list because the feed joins
/// owners without flattening them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoListItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub video: MediaAsset,
    pub thumbnail: MediaAsset,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub owner: Vec<ChannelSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoListItem {
    pub fn new(video: Video, owner: Option<ChannelSummary>) -> Self {
        VideoListItem {
            id: video.id,
            video: video.video,
            thumbnail: video.thumbnail,
            title: video.title,
            description: video.description,
            duration: video.duration,
            views: video.views,
            is_published: video.is_published,
            owner: owner.into_iter().collect(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

/// Single published video as seen by a given viewer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub video: MediaAsset,
    pub thumbnail: MediaAsset,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub views: i64,
    pub owner: VideoOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
}

impl VideoDetails {
    pub fn new(video: Video, owner: VideoOwner, likes_count: i64, is_liked: bool) -> Self {
        VideoDetails {
            id: video.id,
            video: video.video,
            thumbnail: video.thumbnail,
            title: video.title,
            description: video.description,
            duration: video.duration,
            views: video.views,
            owner,
            created_at: video.created_at,
            updated_at: video.updated_at,
            likes_count,
            is_liked,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishStatus {
    pub is_published: bool,
}
