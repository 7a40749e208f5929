//! Contact form handler

use axum::extract::State;
use lindenau_common::{ActionResponse, Error, ValidatedJson};
use lindenau_email::ContactMessage;

use super::ContactState;
use crate::domain::ContactRequest;

pub const SEND_FAILED: &str = "Failed to send message. Please try again later.";

/// Forward a visitor's message to the studio inbox
pub async fn send_message(
    State(state): State<ContactState>,
    ValidatedJson(req): ValidatedJson<ContactRequest>,
) -> ActionResponse {
    let message = ContactMessage::from(req);
    tracing::info!(subject = %message.subject, "Contact form submission received");

    match state.email.send_contact_message(&message).await {
        Ok(receipt) => {
            tracing::info!(message_id = %receipt.message_id, "Contact message forwarded");
            ActionResponse::ok_with_message("Message sent successfully")
        }
        Err(e) => ActionResponse::from_error(Error::Upstream(e.to_string()), SEND_FAILED),
    }
}
