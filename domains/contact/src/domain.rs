//! Contact form request and its validation rules

use std::sync::LazyLock;

use lindenau_email::ContactMessage;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Minimal e-mail shape: something@something.something, no whitespace
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape regex is valid")
});

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 200, message = "Name is too long")
    )]
    pub name: String,

    #[validate(regex(path = *EMAIL_SHAPE, message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Subject is required"),
        length(max = 300, message = "Subject is too long")
    )]
    pub subject: String,

    #[validate(
        custom(function = "not_blank", message = "Please provide a message"),
        length(max = 10000, message = "Message is too long")
    )]
    pub message: String,
}

impl From<ContactRequest> for ContactMessage {
    fn from(req: ContactRequest) -> Self {
        ContactMessage {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            subject: req.subject.trim().to_string(),
            message: req.message.trim().to_string(),
        }
    }
}
