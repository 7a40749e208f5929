//! Artwork Store contract
//!
//! The persistent table behind the repository. Implementations only move
//! rows; validation, slugs, uploads and ordering rules live above them.

use chrono::{DateTime, Utc};
use lindenau_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{Artwork, ArtworkFields};

pub type StoreResult<T> = std::result::Result<T, RepositoryError>;

/// Column values written by an update
#[derive(Debug, Clone)]
pub struct ArtworkChanges {
    pub fields: ArtworkFields,
    pub slug: String,
    pub position: i32,
    /// Replacement image; `None` keeps the current one
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait ArtworkStore: Send + Sync {
    /// All rows ordered by position, ties broken by creation time
    async fn select_all(&self) -> StoreResult<Vec<Artwork>>;

    async fn select_by_id(&self, id: Uuid) -> StoreResult<Option<Artwork>>;

    /// Lowest-positioned row carrying the slug
    async fn select_by_slug(&self, slug: &str) -> StoreResult<Option<Artwork>>;

    /// Rows whose title equals `title` ignoring case
    async fn select_by_title_ci(&self, title: &str) -> StoreResult<Vec<Artwork>>;

    async fn count(&self) -> StoreResult<i64>;

    async fn insert(&self, artwork: &Artwork) -> StoreResult<Artwork>;

    /// Apply `changes`; `None` when the row does not exist.
    /// The stored `updated_at` never moves backwards.
    async fn update(&self, id: Uuid, changes: &ArtworkChanges) -> StoreResult<Option<Artwork>>;

    /// Set one position; false when the row does not exist
    async fn update_position(
        &self,
        id: Uuid,
        position: i32,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool>;

    /// Remove a row; false when it did not exist
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
