//! Contact domain: visitor messages forwarded to the studio inbox

pub mod api;
pub mod domain;

pub use api::routes;
pub use api::ContactState;
pub use domain::ContactRequest;
