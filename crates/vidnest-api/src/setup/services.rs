//! Store and media service wiring

use sqlx::PgPool;
use std::sync::Arc;
use vidnest_core::Config;
use vidnest_processing::FfprobeDurationProbe;
use vidnest_storage::{MediaHost, Storage};

use crate::state::{AppState, DbState, MediaState};

/// Build the application state on top of a connected pool and storage backend.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let media = MediaState {
        host: MediaHost::new(storage),
        probe: Arc::new(FfprobeDurationProbe::new(config.ffprobe_path().to_string())),
        max_video_size: config.max_video_size_bytes(),
        max_image_size: config.max_image_size_bytes(),
    };

    tracing::info!(
        ffprobe_path = config.ffprobe_path(),
        max_video_mb = config.max_video_size_bytes() / 1024 / 1024,
        max_image_mb = config.max_image_size_bytes() / 1024 / 1024,
        "Services initialized"
    );

    Arc::new(AppState::new(config.clone(), DbState::postgres(pool), media))
}
