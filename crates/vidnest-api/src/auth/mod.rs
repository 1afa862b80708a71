//! Session authentication
//!
//! Access tokens are HS256 JWTs whose subject is a user id. The middleware
//! resolves the user once per request and stores it as [`CurrentUser`].

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtKeys;
pub use middleware::{auth_middleware, AuthState};
pub use models::{CurrentUser, JwtClaims};
