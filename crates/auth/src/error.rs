//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidUserId,
    /// Anonymous (public key) tokens never open a session
    AnonymousSession,
    /// Valid session, but not on the admin allowlist
    NotAdmin,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotAdmin => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match self {
            AuthError::MissingAuthorization => {
                ("MISSING_AUTHORIZATION", "Please sign in to continue")
            }
            AuthError::InvalidAuthorizationFormat => (
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => ("INVALID_TOKEN", "Invalid or expired session"),
            AuthError::InvalidUserId => ("INVALID_TOKEN", "Invalid user ID in token"),
            AuthError::AnonymousSession => ("INVALID_TOKEN", "Please sign in to continue"),
            AuthError::NotAdmin => ("NOT_ADMIN", "Admin access required"),
        };

        tracing::debug!(code, "Rejected admin request");

        let body = Json(json!({
            "success": false,
            "message": message,
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
