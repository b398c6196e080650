// crates/backend-lib/src/error.rs

//! Central error types + Axum integration.
use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup-fatal configuration problems; the server never binds when one occurs
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("configuration file not found: {0}")]
    Missing(String),

    #[error("jwt.key is missing or empty")]
    MissingSigningKey,

    #[error("jwt.key is {actual} bytes, HS256 requires at least {min}")]
    WeakSigningKey { actual: usize, min: usize },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Per-request errors, translated to a status code at the handler boundary
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad login credentials; which field was wrong is never disclosed
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid or expired access token: {0}")]
    InvalidOrExpiredAccessToken(String),

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Body missing, not JSON, or lacking a required field
    #[error("Invalid request body: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidOrExpiredAccessToken(_) => {
                StatusCode::UNAUTHORIZED
            },
            AppError::InvalidRefreshToken | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "AUTH_001",
            AppError::InvalidOrExpiredAccessToken(_) => "AUTH_002",
            AppError::InvalidRefreshToken => "AUTH_003",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Unauthorized | AppError::InvalidOrExpiredAccessToken(_) => {
                "Authentication failed".to_string()
            },
            AppError::InvalidRefreshToken => "Invalid refresh token".to_string(),
            AppError::InvalidInput(_) => "Invalid request body".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            // Authorization failures carry no body detail
            AppError::Unauthorized | AppError::InvalidOrExpiredAccessToken(_) => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")]).into_response()
            },
            _ => {
                match &self {
                    AppError::Internal(msg) => tracing::error!(error = %msg, "request failed"),
                    AppError::InvalidInput(reason) => tracing::debug!(%reason, "request body rejected"),
                    _ => {},
                }
                let body = serde_json::json!({
                    "error": {
                        "code": self.error_code(),
                        "message": self.sanitized_message(),
                    }
                });
                (status, axum::Json(body)).into_response()
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
