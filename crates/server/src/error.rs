//! Unified error handling for the server.
//!
//! Game-domain errors from `sim-core` are mapped onto HTTP responses here:
//! unknown entities become 404, every other recoverable game failure is a
//! 400 with the error message in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sim_core::GameError;

/// Application error type with HTTP response mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::PlayerNotFound(_) | GameError::AssetNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = axum::Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::NotFound("player ghost".into());
        assert_eq!(err.to_string(), "Not found: player ghost");
    }

    #[test]
    fn test_game_error_mapping() {
        let err: AppError = GameError::PlayerNotFound("ghost".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = GameError::InsufficientFunds { needed: 10.0, available: 1.0 }.into();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err: AppError = GameError::EmptyName.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
