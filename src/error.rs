use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum BuddyError {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("admin authentication required")]
    AdminRequired,

    #[error("invalid identifier or password")]
    InvalidCredentials,

    #[error("identifier is already in use")]
    DuplicateIdentifier,

    #[error("invalid user filter: {0}")]
    InvalidUserFilter(String),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

impl IntoResponse for BuddyError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            BuddyError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "AUTH_REQUIRED".to_string(),
                    message: "Authentication required.".to_string(),
                },
            ),
            BuddyError::AdminRequired => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "ADMIN_REQUIRED".to_string(),
                    message: "Admin authentication required.".to_string(),
                },
            ),
            BuddyError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: "Invalid identifier or password.".to_string(),
                },
            ),
            BuddyError::DuplicateIdentifier => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "DUPLICATE_IDENTIFIER".to_string(),
                    message: "Identifier is already in use.".to_string(),
                },
            ),
            BuddyError::InvalidUserFilter(raw) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "INVALID_FILTER".to_string(),
                    message: format!("Expected `all` or a user id, got `{raw}`."),
                },
            ),
            BuddyError::Database(e) => {
                // Operator log keeps the detail; the caller gets a generic 500.
                error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
