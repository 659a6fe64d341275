//! # Error Handling Middleware
//!
//! Maps the domain error taxonomy onto HTTP status codes and JSON error
//! bodies of the form `{ "error": message }`.
//!
//! Validation and not-found messages are returned as-is. Persistence and
//! internal failures are logged in full and answered with a generic message;
//! nothing is retried.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use codeconnect_core::errors::ConnectError;
use serde_json::json;
use tracing::error;

/// Message returned for failures the user cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use codeconnect_api::middleware::error_handling::AppError;
/// use codeconnect_core::errors::ConnectError;
///
/// async fn handler(start: String, end: String) -> Result<Json<()>, AppError> {
///     if start >= end {
///         return Err(AppError(ConnectError::validation("End time must be after start time")));
///     }
///     Ok(Json(()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ConnectError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ConnectError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ConnectError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ConnectError::Persistence(report) => {
                error!("Persistence failure: {:?}", report);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE.to_string())
            }
            ConnectError::Internal(err) => {
                error!("Internal failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Automatic conversion from ConnectError to AppError
///
/// Allows using `?` on `ConnectResult<T>` inside handlers returning `Result<T, AppError>`.
impl From<ConnectError> for AppError {
    fn from(err: ConnectError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository-level failures surface as persistence errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ConnectError::Persistence(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ConnectError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(ConnectError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(ConnectError::validation(rejection.body_text()))
    }
}

/// Turns a handler panic into an internal error response.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError(ConnectError::Internal(format!("handler panicked: {}", detail).into())).into_response()
}

/// Maps a ConnectError to an HTTP response
pub fn map_error(err: ConnectError) -> Response {
    AppError(err).into_response()
}
