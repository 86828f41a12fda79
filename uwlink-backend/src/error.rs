use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Owner not found")]
    OwnerNotFound,

    #[error("Pet not found")]
    PetNotFound,

    #[error("Username already in use")]
    UsernameTaken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Missing or invalid authorization token")]
    Unauthorized,

    #[error("Authorization token has expired")]
    TokenExpired,

    #[error("Credential error: {0}")]
    CredentialError(#[from] uwlink_auth::AuthError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::OwnerNotFound => (StatusCode::NOT_FOUND, "Owner not found"),
            AppError::PetNotFound => (StatusCode::NOT_FOUND, "Pet not found"),
            AppError::UsernameTaken => (StatusCode::CONFLICT, "Username already in use"),
            // One undifferentiated message for unknown user and wrong password
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Incorrect username or password")
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::DatabaseError(_) => {
                tracing::error!("Database error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::CredentialError(_) => {
                tracing::error!("Credential error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Credential error")
            }
            AppError::ServerError(_) => {
                tracing::error!("Server error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
