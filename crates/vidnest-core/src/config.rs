//! Configuration module
//!
//! Runtime settings are read from the environment (optionally seeded from a
//! `.env` file) into [`Config`], and accessed through its getters.

use std::env;

use crate::storage_types::StorageBackend;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_VIDEO_SIZE_MB: usize = 500;
const MAX_IMAGE_SIZE_MB: usize = 10;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const MB: usize = 1024 * 1024;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub request_timeout_secs: u64,
    pub environment: String,
}

/// Full application settings
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Media host
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Uploads
    pub max_video_size_bytes: usize,
    pub max_image_size_bytes: usize,
    pub ffprobe_path: String,
}

#[derive(Clone, Debug)]
pub struct Config(pub Box<AppConfig>);

impl Config {
    fn inner(&self) -> &AppConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = AppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate(self.is_production())
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().base.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.inner().base.jwt_expiry_hours
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().base.request_timeout_secs
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    /// S3 region, preferring `S3_REGION` over `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        self.inner()
            .s3_region
            .as_deref()
            .or(self.inner().aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.inner().max_video_size_bytes
    }

    pub fn max_image_size_bytes(&self) -> usize {
        self.inner().max_image_size_bytes
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.inner().ffprobe_path
    }
}

impl AppConfig {
    /// Read every setting from the process environment, after seeding it
    /// from `.env` when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let base = BaseConfig {
            server_port: required_parse("PORT", Some("4000"))?,
            cors_origins: optional("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_or("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_hours: env_or("JWT_EXPIRY_HOURS", JWT_EXPIRY_HOURS),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", REQUEST_TIMEOUT_SECS),
            environment: optional("ENVIRONMENT")
                .or_else(|| optional("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
        };

        let storage_backend = optional("STORAGE_BACKEND")
            .map(|raw| raw.parse::<StorageBackend>())
            .transpose()?;

        Ok(AppConfig {
            base,
            database_url: required("DATABASE_URL")?,
            storage_backend,
            s3_bucket: optional("S3_BUCKET"),
            s3_region: optional("S3_REGION"),
            s3_endpoint: optional("S3_ENDPOINT"),
            aws_region: optional("AWS_REGION"),
            local_storage_path: optional("LOCAL_STORAGE_PATH"),
            local_storage_base_url: optional("LOCAL_STORAGE_BASE_URL"),
            max_video_size_bytes: env_or("MAX_VIDEO_SIZE_MB", MAX_VIDEO_SIZE_MB) * MB,
            max_image_size_bytes: env_or("MAX_IMAGE_SIZE_MB", MAX_IMAGE_SIZE_MB) * MB,
            ffprobe_path: optional("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
        })
    }

    /// Cross-field checks that parsing alone cannot catch.
    pub fn validate(&self, is_production: bool) -> Result<(), anyhow::Error> {
        let secret = &self.base.jwt_secret;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");
        anyhow::ensure!(
            !is_production || secret.len() >= 32,
            "JWT_SECRET needs 32+ characters in production"
        );

        anyhow::ensure!(
            ["postgres://", "postgresql://"]
                .iter()
                .any(|scheme| self.database_url.starts_with(scheme)),
            "DATABASE_URL must be a postgres:// connection string"
        );

        let backend = self.storage_backend.unwrap_or(StorageBackend::Local);
        let missing: Vec<(&str, bool)> = match backend {
            StorageBackend::S3 => vec![
                ("S3_BUCKET", self.s3_bucket.is_none()),
                (
                    "S3_REGION or AWS_REGION",
                    self.s3_region.is_none() && self.aws_region.is_none(),
                ),
            ],
            StorageBackend::Local => vec![
                ("LOCAL_STORAGE_PATH", self.local_storage_path.is_none()),
                ("LOCAL_STORAGE_BASE_URL", self.local_storage_base_url.is_none()),
            ],
        };
        if let Some((name, _)) = missing.into_iter().find(|(_, absent)| *absent) {
            anyhow::bail!("{} must be set for the {} media backend", name, backend);
        }

        Ok(())
    }
}

/// Non-empty value of `key`, if set.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str) -> Result<String, anyhow::Error> {
    optional(key).ok_or_else(|| anyhow::anyhow!("{} must be set", key))
}

/// Like [`required`], but parsed; `default` stands in for a missing value.
fn required_parse<T: std::str::FromStr>(
    key: &str,
    default: Option<&str>,
) -> Result<T, anyhow::Error> {
    let raw = match optional(key) {
        Some(raw) => raw,
        None => default
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("{} must be set", key))?,
    };
    raw.parse()
        .map_err(|_| anyhow::anyhow!("{} must be a valid number, got {:?}", key, raw))
}

/// Parsed value of `key`, falling back to `default` when missing or malformed.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    optional(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}
