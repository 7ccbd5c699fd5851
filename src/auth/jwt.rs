use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::config::AuthConfig;

/// Claims carried by ApoloHRA bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Caller identity
    pub sub: String,
    pub exp: i64,
}

/// Validate an HS256 token against the configured secret.
/// Issuer and audience are only checked when configured.
pub fn validate_jwt(token: &str, config: &AuthConfig) -> Result<Claims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    let mut required = vec!["exp"];
    match &config.audience {
        Some(audience) => {
            validation.set_audience(&[audience]);
            required.push("aud");
        }
        None => validation.validate_aud = false,
    }
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
        required.push("iss");
    }
    validation.set_required_spec_claims(&required);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        ApiError::Unauthorized(format!("Invalid JWT token: {}", e))
    })?;

    Ok(token_data.claims)
}

/// Token part of an `Authorization: Bearer <token>` value. The scheme is
/// matched case-insensitively; an empty token is rejected here.
pub fn bearer_token(auth_header: Option<&str>) -> Result<&str, ApiError> {
    let value = auth_header
        .map(str::trim)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Unauthorized(format!(
            "Unsupported authorization scheme '{}'",
            scheme
        )));
    }

    match token.trim() {
        "" => Err(ApiError::Unauthorized("Empty bearer token".to_string())),
        token => Ok(token),
    }
}

/// Authenticate a request from its headers
pub fn authorize(headers: &HeaderMap, config: &AuthConfig) -> Result<Claims, ApiError> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = bearer_token(auth_header)?;
    validate_jwt(token, config)
}
