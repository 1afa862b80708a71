use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidnest_core::{
    models::{Like, LikeTarget, Video, VideoRow},
    AppError,
};

use crate::store_traits::LikeStore;

const LIKE_COLUMNS: &str = "id, video, comment, tweet, liked_by, created_at, updated_at";

/// Repository for likes on videos, comments and tweets
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for LikeRepository {
    #[tracing::instrument(skip(self), fields(db.table = "likes", db.operation = "select"))]
    async fn find(&self, target: LikeTarget, liked_by: Uuid) -> Result<Option<Like>, AppError> {
        let sql = format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE {} = $1 AND liked_by = $2 ORDER BY created_at ASC LIMIT 1",
            target.column()
        );
        let like = sqlx::query_as::<Postgres, Like>(&sql)
            .bind(target.id())
            .bind(liked_by)
            .fetch_optional(&self.pool)
            .await?;

        Ok(like)
    }

    #[tracing::instrument(skip(self), fields(db.table = "likes", db.operation = "insert"))]
    async fn create(&self, target: LikeTarget, liked_by: Uuid) -> Result<Like, AppError> {
        let sql = format!(
            "INSERT INTO likes ({}, liked_by) VALUES ($1, $2) RETURNING {LIKE_COLUMNS}",
            target.column()
        );
        let like = sqlx::query_as::<Postgres, Like>(&sql)
            .bind(target.id())
            .bind(liked_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(like)
    }

    #[tracing::instrument(skip(self), fields(db.table = "likes", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "likes", db.operation = "select", user = %user))]
    async fn liked_videos(&self, user: Uuid) -> Result<Vec<Video>, AppError> {
        let rows = sqlx::query_as::<Postgres, VideoRow>(
            r#"
            SELECT v.id, v.video_public_id, v.video_url, v.thumbnail_public_id, v.thumbnail_url,
                   v.title, v.description, v.duration, v.views, v.is_published, v.owner,
                   v.created_at, v.updated_at
            FROM videos v
            JOIN (
                SELECT video, MAX(created_at) AS liked_at
                FROM likes
                WHERE liked_by = $1 AND video IS NOT NULL
                GROUP BY video
            ) l ON l.video = v.id
            ORDER BY l.liked_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Video::from).collect())
    }
}
