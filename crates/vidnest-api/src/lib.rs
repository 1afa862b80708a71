//! Vidnest HTTP API
//!
//! Axum handlers for videos, comments, playlists and likes, together with the
//! authentication glue, middleware and start-up code that wire them to the
//! document store and the media host.
//!
//! The binary in `main.rs` only loads configuration and calls
//! [`setup::initialize_app`]; everything else is reachable from this library
//! so integration tests can drive the real router.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::HttpAppError;
pub use response::ApiResponse;
pub use state::AppState;
