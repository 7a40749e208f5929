//! Custom axum extractors for Lindenau

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{ActionResponse, Error};

/// JSON extractor that validates the deserialized value automatically.
///
/// Used by write endpoints, so both malformed JSON and failed validation
/// are rejected with the `{success: false, message}` envelope and a 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl ValidatedJsonRejection {
    pub fn message(&self) -> String {
        match self {
            ValidatedJsonRejection::Json(e) => e.body_text(),
            ValidatedJsonRejection::Validation(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self.message(), "Rejected request body");
        ActionResponse::failure(self.message())
            .with_status(StatusCode::BAD_REQUEST)
            .into_response()
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value
            .validate()
            .map_err(|e| ValidatedJsonRejection::Validation(validation_error(&e)))?;
        Ok(ValidatedJson(value))
    }
}

/// Flatten validator output into a single readable sentence.
///
/// Field messages declared with `#[validate(..., message = "...")]` are used
/// verbatim; fields without one fall back to "<field> is invalid".
pub fn validation_error(errors: &ValidationErrors) -> Error {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();

    if messages.is_empty() {
        Error::Validation("Invalid request".to_string())
    } else {
        Error::Validation(messages.join("; "))
    }
}
