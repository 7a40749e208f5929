//! Route definitions for Artworks domain API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use super::handlers::{admin, gallery};
use super::middleware::ArtworksState;

/// Largest accepted admin upload (form fields plus image)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Public, unauthenticated gallery routes
fn gallery_routes() -> Router<ArtworksState> {
    Router::new()
        .route("/api/artworks", get(gallery::list_artworks))
        .route("/api/artworks/{id}", get(gallery::get_artwork))
        .route("/api/gallery/{slug}", get(gallery::get_artwork_by_slug))
}

/// Admin write routes; each handler takes the `AdminUser` extractor
fn admin_routes() -> Router<ArtworksState> {
    Router::new()
        .route("/api/admin/artworks", post(admin::create_artwork))
        .route(
            "/api/admin/artworks/positions",
            put(admin::update_positions),
        )
        .route(
            "/api/admin/artworks/{id}",
            put(admin::update_artwork).delete(admin::delete_artwork),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Create all Artworks domain API routes
pub fn routes() -> Router<ArtworksState> {
    Router::new().merge(gallery_routes()).merge(admin_routes())
}
