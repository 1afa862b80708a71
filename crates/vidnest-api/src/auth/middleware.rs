use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use vidnest_core::AppError;
use vidnest_db::UserStore;

use super::jwt::JwtKeys;
use super::models::CurrentUser;
use crate::constants::ACCESS_TOKEN_COOKIE;
use crate::error::HttpAppError;

#[derive(Clone)]
pub struct AuthState {
    pub keys: JwtKeys,
    pub users: Arc<dyn UserStore>,
}

/// Resolve the session user from the `accessToken` cookie or a bearer token.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("Request without access token");
        return unauthorized("Unauthorized request");
    };

    let claims = match auth_state.keys.verify(&token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    let user = match auth_state.users.find_by_id(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(user_id = %claims.sub, "Access token for unknown user");
            return unauthorized("Invalid Access Token");
        }
        Err(e) => return HttpAppError(e).into_response(),
    };

    tracing::debug!(user_id = %user.id, "Request authenticated");
    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}

/// Cookie first, then `Authorization: Bearer`.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_is_read() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn cookie_wins_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer header"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; accessToken=cookie; other=1"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("cookie"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_token(&headers), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
