//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use vidnest_core::Config;

const RECOMMENDED_JWT_SECRET_LEN: usize = 32;

/// Validate critical configuration values
///
/// Runs the config's own consistency checks, then the settings the HTTP layer
/// depends on.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.request_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("Request timeout cannot be 0"));
    }

    if config.jwt_expiry_hours() <= 0 {
        return Err(anyhow::anyhow!("JWT_EXPIRY_HOURS must be positive"));
    }

    if config.max_video_size_bytes() == 0 || config.max_image_size_bytes() == 0 {
        return Err(anyhow::anyhow!("Upload size limits cannot be 0"));
    }

    if !is_production && config.jwt_secret().len() < RECOMMENDED_JWT_SECRET_LEN {
        tracing::warn!(
            length = config.jwt_secret().len(),
            "JWT_SECRET is shorter than {} characters; fine for development only",
            RECOMMENDED_JWT_SECRET_LEN
        );
    }

    Ok(())
}
