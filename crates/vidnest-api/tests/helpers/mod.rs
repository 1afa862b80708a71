//! Test helpers: build AppState and router over in-memory stores.
//!
//! Run from workspace root: `cargo test -p vidnest-api`.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::sync::Arc;
use vidnest_api::auth::JwtKeys;
use vidnest_api::constants;
use vidnest_api::setup::routes;
use vidnest_api::state::{AppState, DbState, MediaState};
use vidnest_core::models::User;
use vidnest_core::{AppConfig, AppError, BaseConfig, Config, StorageBackend};
use vidnest_db::test_helpers::InMemoryStore;
use vidnest_processing::DurationProbe;
use vidnest_storage::test_helpers::MockStorage;
use vidnest_storage::MediaHost;

pub const TEST_JWT_SECRET: &str = "test-secret-with-at-least-32-characters!";
pub const TEST_DURATION_SECS: f64 = 12.5;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Reports the same duration for every URL.
pub struct FixedDuration(pub f64);

#[async_trait]
impl DurationProbe for FixedDuration {
    async fn duration_seconds(&self, _url: &str) -> Result<f64, AppError> {
        Ok(self.0)
    }
}

pub struct TestUser {
    pub user: User,
    pub token: String,
}

/// Test application: server plus handles on the in-memory backends.
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryStore,
    pub storage: MockStorage,
    pub keys: JwtKeys,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a user and issue an access token for it.
    pub fn register_user(&self, username: &str) -> TestUser {
        let user = self.store.add_user(username);
        let token = self.keys.issue(user.id).expect("issue token");
        TestUser { user, token }
    }
}

pub fn create_test_config() -> Config {
    Config(Box::new(AppConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_expiry_hours: 1,
            request_timeout_secs: 30,
            environment: "test".to_string(),
        },
        database_url: "postgres://unused/vidnest".to_string(),
        storage_backend: Some(StorageBackend::S3),
        s3_bucket: Some("vidnest-test".to_string()),
        s3_region: Some("us-east-1".to_string()),
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: None,
        local_storage_base_url: None,
        max_video_size_bytes: 1024 * 1024,
        max_image_size_bytes: 64 * 1024,
        ffprobe_path: "ffprobe".to_string(),
    }))
}

pub fn setup_test_app() -> TestApp {
    let config = create_test_config();
    let store = InMemoryStore::new();
    let storage = MockStorage::new();

    let media = MediaState {
        host: MediaHost::new(Arc::new(storage.clone())),
        probe: Arc::new(FixedDuration(TEST_DURATION_SECS)),
        max_video_size: config.max_video_size_bytes(),
        max_image_size: config.max_image_size_bytes(),
    };
    let state = Arc::new(AppState::new(
        config.clone(),
        DbState::shared(store.clone()),
        media,
    ));

    let router = routes::setup_routes(&config, state).expect("build router");
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        store,
        storage,
        keys: JwtKeys::new(TEST_JWT_SECRET, 1),
    }
}

pub fn video_part() -> Part {
    Part::bytes(b"\x00\x00\x00\x18ftypmp42".to_vec())
        .file_name("clip.mp4")
        .mime_type("video/mp4")
}

pub fn thumbnail_part() -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\n".to_vec())
        .file_name("thumb.png")
        .mime_type("image/png")
}

pub fn publish_form(title: &str, description: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("description", description.to_string())
        .add_part(constants::VIDEO_FILE_FIELD, video_part())
        .add_part(constants::THUMBNAIL_FIELD, thumbnail_part())
}

/// Publish a video as `user` and return its id.
pub async fn publish_video(app: &TestApp, user: &TestUser, title: &str) -> String {
    let response = app
        .client()
        .post(&api_path("/videos"))
        .add_header("Authorization", bearer(&user.token))
        .multipart(publish_form(title, "a description"))
        .await;
    assert_eq!(response.status_code(), 200, "publish video");
    let body: serde_json::Value = response.json();
    body["data"]["_id"]
        .as_str()
        .expect("video id in response")
        .to_string()
}
