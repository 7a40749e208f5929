//! Domain layer for the Artworks domain

pub mod entities;
pub mod ordering;
pub mod slug;
