//! API layer for the Contact domain

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use lindenau_email::EmailService;

pub use routes::routes;

/// Application state for the Contact domain
#[derive(Clone)]
pub struct ContactState {
    pub email: Arc<dyn EmailService>,
}
