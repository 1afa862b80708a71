//! Router assembly. Per-resource route groups live in `domains`.

mod domains;

use crate::api_doc::ApiDoc;
use crate::auth::{auth_middleware, AuthState, JwtKeys};
use crate::constants::{API_BASE, API_PREFIX, LOCAL_MEDIA_ROUTE};
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use vidnest_core::{Config, StorageBackend};

// Room for multipart boundaries and text fields on top of the file limits.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the full router: public routes, JWT-protected resource routes,
/// API docs, and the HTTP layer stack.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = AuthState {
        keys: JwtKeys::new(config.jwt_secret(), config.jwt_expiry_hours()),
        users: state.db.users.clone(),
    };

    let public_routes = public_routes(state.clone());
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(Arc::new(auth_state), auth_middleware),
    );

    let mut routes = public_routes.merge(protected_routes);

    if let Some(dir) = local_media_dir(config) {
        tracing::info!(dir = dir, route = LOCAL_MEDIA_ROUTE, "Serving local media files");
        routes = routes.nest_service(LOCAL_MEDIA_ROUTE, ServeDir::new(dir));
    }

    let max_in_flight = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    // One publish request carries a video and a thumbnail
    let body_limit =
        config.max_video_size_bytes() + config.max_image_size_bytes() + MULTIPART_OVERHEAD_BYTES;

    tracing::info!(max_in_flight, body_limit, "HTTP limits configured");
    let app = routes
        .merge(utoipa_rapidoc::RapiDoc::new(format!("{}/openapi.json", API_BASE)).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(max_in_flight))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs(),
        )))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS allows any origin");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Directory to serve under [`LOCAL_MEDIA_ROUTE`] when assets live on local disk.
fn local_media_dir(config: &Config) -> Option<&str> {
    match config.storage_backend().unwrap_or(StorageBackend::Local) {
        StorageBackend::Local => config.local_storage_path(),
        StorageBackend::S3 => None,
    }
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/healthcheck", API_PREFIX),
            get(handlers::health::health_check),
        )
        .route(
            &format!("{}/openapi.json", API_BASE),
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(domains::video_routes(state.clone()))
        .merge(domains::comment_routes(state.clone()))
        .merge(domains::playlist_routes(state.clone()))
        .merge(domains::like_routes(state))
}
