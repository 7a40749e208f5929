//! JWT validation and token extraction helpers

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::SupabaseClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Cookie carrying the admin session token for browser clients
pub(crate) const SESSION_COOKIE: &str = "lindenau_session";

/// Validate a session JWT
pub(crate) fn validate_jwt_token(
    token: &str,
    config: &AuthConfig,
) -> Result<SupabaseClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<SupabaseClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Pull the session token from `Authorization: Bearer` or the session cookie.
///
/// The header wins when both are present.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(header) = headers.get(AUTHORIZATION) {
        let header_str = header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

        return match header_str.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(AuthError::InvalidAuthorizationFormat),
        };
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or(AuthError::MissingAuthorization)
}
