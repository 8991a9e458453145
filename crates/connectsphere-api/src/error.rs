use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use connectsphere_db::ActionError;

/// Wraps [`ActionError`] so handlers can `?` it straight into an HTTP
/// response. Every failure becomes `{"error": "..."}` with a status
/// per the action taxonomy; storage details are logged, never leaked.
pub struct ApiError(ActionError);

impl From<ActionError> for ApiError {
    fn from(e: ActionError) -> Self {
        ApiError(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError(ActionError::Persistence(e.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ActionError::Unauthenticated => (StatusCode::UNAUTHORIZED, "not signed in".to_string()),
            ActionError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ActionError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ActionError::PreconditionFailed(m) => (StatusCode::CONFLICT, m.clone()),
            ActionError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            ActionError::Persistence(detail) => {
                error!("storage failure: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong, please try again".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn not_found() -> ApiError {
    ApiError(ActionError::NotFound)
}

pub fn validation(message: impl Into<String>) -> ApiError {
    ApiError(ActionError::Validation(message.into()))
}

pub fn conflict(message: impl Into<String>) -> ApiError {
    ApiError(ActionError::Conflict(message.into()))
}

pub fn internal(message: impl Into<String>) -> ApiError {
    ApiError(ActionError::Persistence(message.into()))
}
