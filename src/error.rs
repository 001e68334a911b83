use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The realm advertised in the Basic-auth challenge header.
pub const REALM: &str = "Basic realm=\"Secure Area\"";

/// ApiError
///
/// The single error type crossing the handler boundary. Every failure a request
/// can produce is converted into one of these variants and then into a
/// plain-text HTTP response by the `IntoResponse` impl below, so no handler
/// builds status codes by hand.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent a payload or query the contract rejects (400).
    #[error("{0}")]
    Validation(String),

    /// No credential was supplied while the gate is guarded (401).
    #[error("Authentication required")]
    AuthRequired,

    /// A credential was supplied but did not match the configured secret (401).
    #[error("Unauthorized")]
    Unauthorized,

    /// The instance is running in read-only demo mode; mutations are disabled (403).
    #[error("Read-only demo")]
    ReadOnly,

    /// The requested record does not exist (404).
    #[error("Job application not found")]
    NotFound,

    /// The backing store failed. Logged server-side, answered with a generic 500.
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    /// Shorthand for the common validation case.
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            // Both 401 variants carry the challenge header so Basic-auth aware
            // clients (browsers included) know how to retry.
            ApiError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, REALM)],
                "Authentication required",
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, REALM)],
                "Unauthorized",
            )
                .into_response(),
            ApiError::ReadOnly => (StatusCode::FORBIDDEN, "Read-only demo").into_response(),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, "Job application not found").into_response()
            }
            ApiError::Store(e) => {
                // The underlying database error never reaches the client.
                tracing::error!("store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
