//! What the admin client needs from the repository

use lindenau_common::{ActionResponse, Result};
use uuid::Uuid;

use crate::domain::entities::{Artwork, ArtworkDraft, ImageUpload, PositionUpdate};
use crate::repository::ArtworkRepository;

pub const CREATE_FAILED: &str = "Failed to create artwork";
pub const UPDATE_FAILED: &str = "Failed to update artwork";
pub const DELETE_FAILED: &str = "Failed to delete artwork";
pub const REPOSITION_FAILED: &str = "Failed to update positions";

/// Reads return data; writes return the `{success, message}` envelope
#[async_trait::async_trait]
pub trait ArtworkGateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Artwork>>;

    async fn get_by_id(&self, id: Uuid) -> Result<Artwork>;

    async fn create(&self, draft: &ArtworkDraft, image: Option<ImageUpload>) -> ActionResponse;

    /// `position` is zero-based
    async fn update(
        &self,
        id: Uuid,
        draft: &ArtworkDraft,
        position: i32,
        image: Option<ImageUpload>,
    ) -> ActionResponse;

    async fn delete(&self, id: Uuid) -> ActionResponse;

    async fn reposition_bulk(&self, updates: &[PositionUpdate]) -> ActionResponse;
}

#[async_trait::async_trait]
impl ArtworkGateway for ArtworkRepository {
    async fn list_all(&self) -> Result<Vec<Artwork>> {
        ArtworkRepository::list_all(self).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Artwork> {
        ArtworkRepository::get_by_id(self, id).await
    }

    async fn create(&self, draft: &ArtworkDraft, image: Option<ImageUpload>) -> ActionResponse {
        ActionResponse::from_result(
            ArtworkRepository::create(self, draft, image).await,
            CREATE_FAILED,
        )
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ArtworkDraft,
        position: i32,
        image: Option<ImageUpload>,
    ) -> ActionResponse {
        ActionResponse::from_result(
            ArtworkRepository::update(self, id, draft, position, image).await,
            UPDATE_FAILED,
        )
    }

    async fn delete(&self, id: Uuid) -> ActionResponse {
        ActionResponse::from_result(ArtworkRepository::delete(self, id).await, DELETE_FAILED)
    }

    async fn reposition_bulk(&self, updates: &[PositionUpdate]) -> ActionResponse {
        ActionResponse::from_result(
            ArtworkRepository::reposition_bulk(self, updates).await,
            REPOSITION_FAILED,
        )
    }
}
