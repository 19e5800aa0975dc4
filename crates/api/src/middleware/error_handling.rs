//! # Error Handling
//!
//! Maps [`VisitError`] to HTTP status codes and a JSON body of the form
//! `{"error": message}` so every handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use tracing::error;
use visitday_core::errors::VisitError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use visitday_api::middleware::error_handling::AppError;
/// use visitday_core::errors::VisitError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.trim().is_empty() {
///         return Err(VisitError::Validation("Name is required".to_string()).into());
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub VisitError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            VisitError::NotFound(_) => StatusCode::NOT_FOUND,
            VisitError::Validation(_) => StatusCode::BAD_REQUEST,
            VisitError::Conflict(_) => StatusCode::CONFLICT,
            VisitError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VisitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<VisitError> for AppError {
    fn from(err: VisitError) -> Self {
        AppError(err)
    }
}

/// Wraps repository failures as [`VisitError::Database`].
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(VisitError::Database(err))
    }
}

/// Maps a VisitError to an HTTP response
pub fn map_error(err: VisitError) -> Response {
    AppError(err).into_response()
}

/// Turns a unique-constraint failure into a [`VisitError::Conflict`] carrying
/// `message`; any other failure stays a database error.
pub fn conflict_on_duplicate(err: eyre::Report, message: impl Into<String>) -> VisitError {
    let duplicate = err
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| matches!(e.kind(), ErrorKind::UniqueViolation));

    if duplicate {
        VisitError::Conflict(message.into())
    } else {
        VisitError::Database(err)
    }
}
