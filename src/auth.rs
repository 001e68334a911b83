use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{config::AppConfig, error::ApiError};

/// access_gate
///
/// The front-door authentication checkpoint, layered over the entire `/jobs`
/// surface in `create_router`. Two states:
///
/// - **Open**: demo mode is active, every request passes through
///   unauthenticated (mutations are still refused later by the read-only
///   check inside the handlers).
/// - **Guarded** (default): the request must carry `Authorization: Basic ...`
///   whose password component matches the configured shared secret. The
///   username component is ignored.
///
/// Rejections carry the `WWW-Authenticate` challenge via `ApiError`:
/// a missing header is "authentication required", anything present but
/// undecodable or mismatched is "unauthorized".
pub async fn access_gate(
    State(config): State<AppConfig>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if config.demo_mode {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::AuthRequired)?;

    let payload = auth_header
        .strip_prefix("Basic ")
        .ok_or(ApiError::Unauthorized)?;

    let decoded = STANDARD
        .decode(payload)
        .map_err(|_| ApiError::Unauthorized)?;
    let credentials = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

    // RFC 7617: the user-id cannot contain ':' but the password may, so only
    // the first colon separates the two components.
    let (_user, password) = credentials.split_once(':').ok_or(ApiError::Unauthorized)?;

    if password != config.app_password {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
