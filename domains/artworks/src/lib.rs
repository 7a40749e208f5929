//! Artworks domain: gallery entries, ordering, admin controllers

pub mod admin;
pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Artwork, ArtworkDraft, ArtworkFields, Availability, AvailabilityFilter, ImageUpload,
    PositionUpdate,
};
pub use domain::slug::{generate_slug, slug_to_title};

// Re-export repository types
pub use repository::{
    ArtworkChanges, ArtworkRepository, ArtworkStore, InMemoryArtworkStore, PgArtworkStore,
};

// Re-export API types
pub use api::routes;
pub use api::ArtworksState;
