use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidnest_core::{models::User, AppError};

use crate::store_traits::UserStore;

/// Repository for reading users and maintaining their watch history
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, username, email, full_name, avatar, cover_image, watch_history, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    async fn has_watched(&self, user_id: Uuid, video_id: Uuid) -> Result<bool, AppError> {
        let watched = sqlx::query_scalar::<Postgres, bool>(
            "SELECT $2 = ANY(watch_history) FROM users WHERE id = $1",
        )
        .bind(user_id)
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(watched.unwrap_or(false))
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update"))]
    async fn push_watch_history(&self, user_id: Uuid, video_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET watch_history = array_append(watch_history, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
