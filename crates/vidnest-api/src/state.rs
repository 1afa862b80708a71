//! Application state and sub-states.
//!
//! AppState is split into a store sub-state and a media sub-state so handlers
//! reach only what they need (`state.db.videos`, `state.media.host`).

use std::sync::Arc;

use sqlx::PgPool;
use vidnest_core::Config;
use vidnest_db::{
    CommentRepository, CommentStore, LikeRepository, LikeStore, PlaylistRepository,
    PlaylistStore, UserRepository, UserStore, VideoRepository, VideoStore,
};
use vidnest_processing::DurationProbe;
use vidnest_storage::MediaHost;

/// One handle per collection of the document store.
#[derive(Clone)]
pub struct DbState {
    pub users: Arc<dyn UserStore>,
    pub videos: Arc<dyn VideoStore>,
    pub comments: Arc<dyn CommentStore>,
    pub playlists: Arc<dyn PlaylistStore>,
    pub likes: Arc<dyn LikeStore>,
}

impl DbState {
    /// Postgres-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            videos: Arc::new(VideoRepository::new(pool.clone())),
            comments: Arc::new(CommentRepository::new(pool.clone())),
            playlists: Arc::new(PlaylistRepository::new(pool.clone())),
            likes: Arc::new(LikeRepository::new(pool)),
        }
    }

    /// Every collection served by clones of a single store value.
    pub fn shared<S>(store: S) -> Self
    where
        S: UserStore + VideoStore + CommentStore + PlaylistStore + LikeStore + Clone + 'static,
    {
        Self {
            users: Arc::new(store.clone()),
            videos: Arc::new(store.clone()),
            comments: Arc::new(store.clone()),
            playlists: Arc::new(store.clone()),
            likes: Arc::new(store),
        }
    }
}

/// Media host, duration probe and upload limits.
#[derive(Clone)]
pub struct MediaState {
    pub host: MediaHost,
    pub probe: Arc<dyn DurationProbe>,
    pub max_video_size: usize,
    pub max_image_size: usize,
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaState,
}

impl AppState {
    pub fn new(config: Config, db: DbState, media: MediaState) -> Self {
        Self { config, db, media }
    }
}
