//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error taxonomy, mapped one-to-one onto response statuses
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::DatabaseError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Infrastructure failures are logged in full but never leak detail
        // to the caller.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let error_response = json!({
            "error": status.as_str(),
            "message": message,
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convert from common error types
impl From<tastebook_auth::AuthError> for GatewayError {
    fn from(error: tastebook_auth::AuthError) -> Self {
        use tastebook_auth::AuthError;

        match error {
            AuthError::UserExists => GatewayError::Conflict(error.to_string()),
            AuthError::InvalidCredentials => GatewayError::InvalidCredentials,
            AuthError::SessionNotFound | AuthError::SessionExpired | AuthError::InvalidSession => {
                GatewayError::Forbidden("authentication required".to_string())
            }
            AuthError::Database(message) => GatewayError::DatabaseError(message),
            AuthError::PasswordHash(e) => GatewayError::InternalError(e.to_string()),
        }
    }
}

impl From<tastebook_database::RecipeError> for GatewayError {
    fn from(error: tastebook_database::RecipeError) -> Self {
        use tastebook_database::RecipeError;

        match error {
            RecipeError::RecipeNotFound => GatewayError::NotFound("Recipe not found".to_string()),
            RecipeError::NotOwner => GatewayError::Forbidden(error.to_string()),
            RecipeError::IdentityRequired => GatewayError::Forbidden(error.to_string()),
            RecipeError::DatabaseError(message) => GatewayError::DatabaseError(message),
            RecipeError::SerializationError(message) => GatewayError::InternalError(message),
        }
    }
}

impl From<tastebook_database::UserError> for GatewayError {
    fn from(error: tastebook_database::UserError) -> Self {
        use tastebook_database::UserError;

        match error {
            UserError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::UsernameTaken => GatewayError::Conflict(error.to_string()),
            UserError::DatabaseError(message) => GatewayError::DatabaseError(message),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(error: sqlx::Error) -> Self {
        GatewayError::DatabaseError(error.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(error: serde_json::Error) -> Self {
        GatewayError::InvalidRequest(format!("JSON serialization error: {}", error))
    }
}
