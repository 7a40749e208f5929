//! Uniform `{success, message}` envelope returned by write operations
//!
//! Every write endpoint converts its outcome into this shape so clients can
//! surface a toast without inspecting error bodies. The HTTP status still
//! reflects the error class.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Status used when rendered over HTTP; not part of the body
    #[serde(skip)]
    status: Option<u16>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            status: None,
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            status: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            status: None,
        }
    }

    /// Override the HTTP status used when this response is rendered
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16());
        self
    }

    /// Convert an operation outcome into the envelope, logging failures.
    ///
    /// `context` names the operation in log lines and doubles as the
    /// user-facing message for server-side failures, whose details are
    /// kept out of the response.
    pub fn from_result<T>(result: Result<T>, context: &str) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::from_error(err, context),
        }
    }

    pub fn from_error(err: Error, context: &str) -> Self {
        let status = err.status_code();
        let message = match &err {
            Error::PartialFailure { applied, total, .. } => {
                tracing::error!(error = %err, operation = context, "Write partially applied");
                format!("{context}: partially applied ({applied} of {total})")
            }
            e if e.is_server_side() => {
                tracing::error!(error = %err, operation = context, "Write operation failed");
                context.to_string()
            }
            _ => {
                tracing::warn!(error = %err, operation = context, "Write operation rejected");
                err.to_string()
            }
        };

        Self::failure(message).with_status(status)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(if self.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
