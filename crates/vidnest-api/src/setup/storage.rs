//! Media host storage setup

use anyhow::{Context, Result};
use std::sync::Arc;
use vidnest_core::Config;
use vidnest_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize media storage")?;

    tracing::info!(backend = %storage.backend_type(), "Media storage ready");
    Ok(storage)
}
