use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidnest_core::{
    models::{Comment, CommentDetails, PageRequest, Paginated, UserSummary},
    AppError,
};

use crate::store_traits::CommentStore;

const COMMENT_COLUMNS: &str = "id, content, video, owner, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CommentDetailsRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_id: Uuid,
    owner_username: String,
    owner_full_name: String,
    owner_avatar: String,
    likes_count: i64,
    is_liked: bool,
}

impl From<CommentDetailsRow> for CommentDetails {
    fn from(row: CommentDetailsRow) -> Self {
        CommentDetails {
            id: row.id,
            content: row.content,
            owner: UserSummary {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                avatar: row.owner_avatar,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            likes_count: row.likes_count,
            is_liked: row.is_liked,
        }
    }
}

/// Repository for comments
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    #[tracing::instrument(skip(self), fields(db.table = "comments", db.operation = "select", video = %video))]
    async fn list_for_video(
        &self,
        video: Uuid,
        viewer: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<CommentDetails>, AppError> {
        // Comments by deleted users are dropped, so the count joins too.
        let total = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM comments c JOIN users u ON u.id = c.owner WHERE c.video = $1",
        )
        .bind(video)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<Postgres, CommentDetailsRow>(
            r#"
            SELECT c.id, c.content, c.created_at, c.updated_at,
                   u.id AS owner_id,
                   u.username AS owner_username,
                   u.full_name AS owner_full_name,
                   u.avatar AS owner_avatar,
                   (SELECT COUNT(*) FROM likes l WHERE l.comment = c.id) AS likes_count,
                   EXISTS(SELECT 1 FROM likes l WHERE l.comment = c.id AND l.liked_by = $2) AS is_liked
            FROM comments c
            JOIN users u ON u.id = c.owner
            WHERE c.video = $1
            ORDER BY c.created_at ASC, c.id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(video)
        .bind(viewer)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let docs = rows.into_iter().map(CommentDetails::from).collect();
        Ok(Paginated::new(docs, total, page))
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "comments", db.operation = "insert", video = %video))]
    async fn create(&self, content: &str, video: Uuid, owner: Uuid) -> Result<Comment, AppError> {
        let sql = format!(
            "INSERT INTO comments (content, video, owner) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<Postgres, Comment>(&sql)
            .bind(content)
            .bind(video)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(comment)
    }

    #[tracing::instrument(skip(self, content), fields(db.table = "comments", db.operation = "update", db.record_id = %id))]
    async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<Comment>, AppError> {
        let sql = format!(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<Postgres, Comment>(&sql)
            .bind(id)
            .bind(content)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    #[tracing::instrument(skip(self), fields(db.table = "comments", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let sql = format!("DELETE FROM comments WHERE id = $1 RETURNING {COMMENT_COLUMNS}");
        let comment = sqlx::query_as::<Postgres, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }
}
