//! HTTP handlers for the Artworks domain

pub mod admin;
pub mod gallery;
