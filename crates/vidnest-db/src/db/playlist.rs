use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidnest_core::{
    models::{NewPlaylist, Playlist},
    AppError,
};

use crate::store_traits::PlaylistStore;

const PLAYLIST_COLUMNS: &str = "id, name, description, owner, videos, created_at, updated_at";

/// Repository for playlists
///
/// The `videos` column is an ordered `UUID[]`; add and remove map onto
/// `array_append` and `array_remove`, each atomic for its row.
#[derive(Clone)]
pub struct PlaylistRepository {
    pool: PgPool,
}

impl PlaylistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistStore for PlaylistRepository {
    #[tracing::instrument(skip(self, playlist), fields(db.table = "playlists", db.operation = "insert", owner = %playlist.owner))]
    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, AppError> {
        let sql = format!(
            "INSERT INTO playlists (name, description, owner) VALUES ($1, $2, $3) RETURNING {PLAYLIST_COLUMNS}"
        );
        let created = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(&playlist.name)
            .bind(&playlist.description)
            .bind(playlist.owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "select"))]
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Playlist>, AppError> {
        let sql = format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE owner = $1 ORDER BY created_at ASC, id ASC"
        );
        let playlists = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Ok(playlists)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, AppError> {
        let sql = format!("SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1");
        let playlist = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "select", db.record_id = %id))]
    async fn contains_video(&self, id: Uuid, video: Uuid) -> Result<Option<bool>, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT $2 = ANY(videos) FROM playlists WHERE id = $1",
        )
        .bind(id)
        .bind(video)
        .fetch_optional(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "update", db.record_id = %id))]
    async fn push_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError> {
        let sql = format!(
            "UPDATE playlists SET videos = array_append(videos, $2), updated_at = NOW() \
             WHERE id = $1 RETURNING {PLAYLIST_COLUMNS}"
        );
        let playlist = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(id)
            .bind(video)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "update", db.record_id = %id))]
    async fn pull_video(&self, id: Uuid, video: Uuid) -> Result<Option<Playlist>, AppError> {
        let sql = format!(
            "UPDATE playlists SET videos = array_remove(videos, $2), updated_at = NOW() \
             WHERE id = $1 RETURNING {PLAYLIST_COLUMNS}"
        );
        let playlist = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(id)
            .bind(video)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }

    #[tracing::instrument(skip(self, name, description), fields(db.table = "playlists", db.operation = "update", db.record_id = %id))]
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Playlist>, AppError> {
        let sql = format!(
            "UPDATE playlists SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {PLAYLIST_COLUMNS}"
        );
        let playlist = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }

    #[tracing::instrument(skip(self), fields(db.table = "playlists", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<Option<Playlist>, AppError> {
        let sql = format!("DELETE FROM playlists WHERE id = $1 RETURNING {PLAYLIST_COLUMNS}");
        let playlist = sqlx::query_as::<Postgres, Playlist>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(playlist)
    }
}
