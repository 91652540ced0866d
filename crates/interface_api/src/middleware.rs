//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use core_kernel::UserId;

use crate::error::ApiError;
use crate::AppState;

/// The authenticated caller, inserted into request extensions by
/// [`auth_middleware`]
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

/// Authentication middleware
///
/// Validates the bearer token and attaches the caller's [`AuthUser`] to the
/// request. Requests without a valid identity never reach the ledger.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            warn!("Missing or invalid Authorization header");
            return Err(ApiError::Unauthorized(
                "authentication required".to_string(),
            ));
        }
    };

    match crate::auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            let user_id: UserId = claims.sub.parse().map_err(|_| {
                warn!("Token subject is not a valid user id");
                ApiError::Unauthorized("invalid or expired token".to_string())
            })?;

            request.extensions_mut().insert(AuthUser(user_id));
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            Err(ApiError::Unauthorized(
                "invalid or expired token".to_string(),
            ))
        }
    }
}

/// Audit logging middleware
///
/// Logs all API requests for compliance and debugging
pub async fn audit_middleware(
    State(_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.0.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
