//! Repository implementations for the Artworks domain

pub mod artworks;
pub mod memory;
pub mod postgres;
pub mod store;

pub use artworks::ArtworkRepository;
pub use memory::InMemoryArtworkStore;
pub use postgres::PgArtworkStore;
pub use store::{ArtworkChanges, ArtworkStore};
