use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidnest_core::{
    models::{
        ChannelSummary, MediaAsset, NewVideo, PageRequest, Paginated, Video, VideoDetails,
        VideoListItem, VideoOwner, VideoRow,
    },
    AppError,
};

use super::VIDEO_COLUMNS;
use crate::store_traits::VideoStore;

/// Feed row: a video left-joined with its owner.
#[derive(sqlx::FromRow)]
struct FeedRow {
    #[sqlx(flatten)]
    video: VideoRow,
    owner_id: Option<Uuid>,
    owner_username: Option<String>,
    owner_full_name: Option<String>,
    owner_avatar: Option<String>,
    owner_subscribers_count: i64,
}

impl From<FeedRow> for VideoListItem {
    fn from(row: FeedRow) -> Self {
        let owner = match (
            row.owner_id,
            row.owner_username,
            row.owner_full_name,
            row.owner_avatar,
        ) {
            (Some(id), Some(username), Some(full_name), Some(avatar)) => Some(ChannelSummary {
                id,
                username,
                full_name,
                avatar,
                subscribers_count: row.owner_subscribers_count,
            }),
            _ => None,
        };
        VideoListItem::new(row.video.into(), owner)
    }
}

/// Video joined with owner, subscription and like state for one viewer.
#[derive(sqlx::FromRow)]
struct DetailsRow {
    #[sqlx(flatten)]
    video: VideoRow,
    owner_username: String,
    owner_full_name: String,
    owner_avatar: String,
    owner_subscribers_count: i64,
    owner_is_subscribed: bool,
    likes_count: i64,
    is_liked: bool,
}

impl From<DetailsRow> for VideoDetails {
    fn from(row: DetailsRow) -> Self {
        let owner = VideoOwner {
            id: row.video.owner,
            username: row.owner_username,
            full_name: row.owner_full_name,
            avatar: row.owner_avatar,
            subscribers_count: row.owner_subscribers_count,
            is_subscribed: row.owner_is_subscribed,
        };
        VideoDetails::new(row.video.into(), owner, row.likes_count, row.is_liked)
    }
}

/// Repository for videos
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", owner = %video.owner))]
    async fn create(&self, video: NewVideo) -> Result<Video, AppError> {
        let sql = format!(
            r#"
            INSERT INTO videos (video_public_id, video_url, thumbnail_public_id, thumbnail_url,
                                title, description, duration, owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VIDEO_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<Postgres, VideoRow>(&sql)
            .bind(&video.video.public_id)
            .bind(&video.video.url)
            .bind(&video.thumbnail.public_id)
            .bind(&video.thumbnail.url)
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.duration)
            .bind(video.owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_with_owners(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<VideoListItem>, AppError> {
        let total = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<Postgres, FeedRow>(
            r#"
            SELECT v.id, v.video_public_id, v.video_url, v.thumbnail_public_id, v.thumbnail_url,
                   v.title, v.description, v.duration, v.views, v.is_published, v.owner,
                   v.created_at, v.updated_at,
                   u.id AS owner_id,
                   u.username AS owner_username,
                   u.full_name AS owner_full_name,
                   u.avatar AS owner_avatar,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel = u.id) AS owner_subscribers_count
            FROM videos v
            LEFT JOIN users u ON u.id = v.owner
            ORDER BY v.created_at ASC, v.id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let docs = rows.into_iter().map(VideoListItem::from).collect();
        Ok(Paginated::new(docs, total, page))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn increment_views(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn find_published_details(
        &self,
        id: Uuid,
        viewer: Uuid,
    ) -> Result<Option<VideoDetails>, AppError> {
        let row = sqlx::query_as::<Postgres, DetailsRow>(
            r#"
            SELECT v.id, v.video_public_id, v.video_url, v.thumbnail_public_id, v.thumbnail_url,
                   v.title, v.description, v.duration, v.views, v.is_published, v.owner,
                   v.created_at, v.updated_at,
                   u.username AS owner_username,
                   u.full_name AS owner_full_name,
                   u.avatar AS owner_avatar,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel = u.id) AS owner_subscribers_count,
                   EXISTS(SELECT 1 FROM subscriptions s WHERE s.channel = u.id AND s.subscriber = $2) AS owner_is_subscribed,
                   (SELECT COUNT(*) FROM likes l WHERE l.video = v.id) AS likes_count,
                   EXISTS(SELECT 1 FROM likes l WHERE l.video = v.id AND l.liked_by = $2) AS is_liked
            FROM videos v
            JOIN users u ON u.id = v.owner
            WHERE v.id = $1 AND v.is_published = TRUE
            "#,
        )
        .bind(id)
        .bind(viewer)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VideoDetails::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Video>, AppError> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1 AND owner = $2");
        let row = sqlx::query_as::<Postgres, VideoRow>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Video::from))
    }

    #[tracing::instrument(skip(self, thumbnail), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn set_thumbnail(
        &self,
        id: Uuid,
        thumbnail: &MediaAsset,
    ) -> Result<Option<Video>, AppError> {
        let sql = format!(
            "UPDATE videos SET thumbnail_public_id = $2, thumbnail_url = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<Postgres, VideoRow>(&sql)
            .bind(id)
            .bind(&thumbnail.public_id)
            .bind(&thumbnail.url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Video::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn set_published(
        &self,
        id: Uuid,
        is_published: bool,
    ) -> Result<Option<Video>, AppError> {
        let sql = format!(
            "UPDATE videos SET is_published = $2, updated_at = NOW() WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
        );
        let row = sqlx::query_as::<Postgres, VideoRow>(&sql)
            .bind(id)
            .bind(is_published)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Video::from))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
