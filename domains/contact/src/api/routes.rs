//! Route definitions for Contact domain API

use axum::{routing::post, Router};

use super::handlers;
use super::ContactState;

pub fn routes() -> Router<ContactState> {
    Router::new().route("/api/contact", post(handlers::send_message))
}
