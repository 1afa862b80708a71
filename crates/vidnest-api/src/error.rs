//! Rendering of [`AppError`] as the API's JSON error envelope.
//!
//! Handlers return `Result<_, HttpAppError>` and use `?` on anything that
//! converts into [`AppError`].

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use validator::ValidationErrors;
use vidnest_core::{AppError, ErrorMetadata, LogLevel};
use vidnest_storage::StorageError;

/// Failure body. Same shape as the success envelope, with `data: null`
/// and `success: false`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    pub message: String,
    pub success: bool,
    pub errors: Vec<String>,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    pub fn from_app_error(error: &AppError, is_production: bool) -> Self {
        let debug_info = (!is_production && !error.is_sensitive())
            .then(|| (error.detailed_message(), error.error_type().to_string()));
        let (details, error_type) = debug_info.unzip();

        Self {
            status_code: error.http_status_code(),
            data: None,
            message: error.client_message(),
            success: false,
            errors: Vec::new(),
            code: error.error_code().to_string(),
            details,
            error_type,
        }
    }
}

/// Local newtype so `IntoResponse` can be implemented for core errors.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let HttpAppError(error) = self;
        record(&error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from_app_error(&error, running_in_production());
        (status, Json(body)).into_response()
    }
}

fn record(error: &AppError) {
    let kind = error.error_type();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, kind, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, kind, "Request failed"),
    }
}

fn running_in_production() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| matches!(env.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

fn from_storage(err: StorageError) -> AppError {
    match err {
        StorageError::InvalidKey(key) => AppError::InvalidInput(key),
        StorageError::Io(io) => AppError::Internal(format!("IO error: {}", io)),
        StorageError::Misconfigured(msg) => AppError::Internal(msg),
        StorageError::Upload(msg) | StorageError::Delete(msg) => AppError::Storage(msg),
    }
}

macro_rules! into_http_error {
    ($($source:ty => $convert:expr),+ $(,)?) => {
        $(
            impl From<$source> for HttpAppError {
                fn from(err: $source) -> Self {
                    HttpAppError($convert(err))
                }
            }
        )+
    };
}

into_http_error! {
    AppError => std::convert::identity,
    ValidationErrors => AppError::from,
    StorageError => from_storage,
    JsonRejection => |rejection: JsonRejection| {
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    },
    anyhow::Error => AppError::from,
}

/// `Json<T>` that answers a malformed body with the 400 envelope instead of
/// axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(inner)) => Ok(ValidatedJson(inner)),
            Err(rejection) => Err(HttpAppError::from(rejection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(err: StorageError) -> AppError {
        HttpAppError::from(err).0
    }

    #[test]
    fn storage_failures_map_to_storage_errors() {
        match convert(StorageError::Upload("Upload failed".to_string())) {
            AppError::Storage(msg) => assert_eq!(msg, "Upload failed"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_storage_key_is_client_input() {
        match convert(StorageError::InvalidKey("Invalid key".to_string())) {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Invalid key"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn storage_io_is_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "disk gone");
        match convert(StorageError::Io(io)) {
            AppError::Internal(msg) => assert!(msg.contains("disk gone")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_request_envelope() {
        let err = AppError::bad_request("Invalid video Id");
        let json = serde_json::to_value(ErrorResponse::from_app_error(&err, false)).unwrap();
        assert_eq!(json["statusCode"], 400);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "Invalid video Id");
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"], serde_json::json!([]));
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["errorType"], "BadRequest");
    }

    #[test]
    fn production_hides_details() {
        let err = AppError::bad_request("Comment is required");
        let json = serde_json::to_value(ErrorResponse::from_app_error(&err, true)).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("errorType").is_none());
        assert_eq!(json["message"], "Comment is required");
    }

    #[test]
    fn sensitive_errors_hide_details() {
        let err = AppError::Storage("bucket credentials rejected".to_string());
        let body = ErrorResponse::from_app_error(&err, false);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Failed to access media storage");
        assert!(body.details.is_none());
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response =
            HttpAppError(AppError::Unauthorized("Unauthorized request".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
