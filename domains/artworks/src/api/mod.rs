//! API layer for the Artworks domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ArtworksState;
pub use routes::routes;
