use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::auth::authorize;

/// Reject requests without a valid bearer token.
/// On success the token's claims are available to handlers as an extension.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authorize(request.headers(), &state.config.auth)?;
    debug!(caller = %claims.sub, path = %request.uri().path(), "Bearer token accepted");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
