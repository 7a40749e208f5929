//! Shared utilities, configuration, and error handling for Lindenau
//!
//! This crate provides common functionality used across the portfolio service:
//! - Configuration management following 12-factor principles
//! - Error types and the uniform `{success, message}` action response
//! - Custom axum extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod response;

pub use config::{Config, SlugLookup};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use response::ActionResponse;
