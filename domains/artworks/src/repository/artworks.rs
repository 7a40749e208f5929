//! Artwork repository
//!
//! Sole writer of artwork records. Combines the Artwork Store with the Blob
//! Store and keeps positions contiguous across deletes.

use std::sync::Arc;

use chrono::Utc;
use lindenau_common::{Error, Result, SlugLookup};
use lindenau_storage::BlobStore;
use uuid::Uuid;

use super::store::{ArtworkChanges, ArtworkStore};
use crate::domain::entities::{Artwork, ArtworkDraft, ImageUpload, PositionUpdate};
use crate::domain::ordering::compaction_plan;
use crate::domain::slug::{generate_slug, slug_to_title};

pub const CREATE_MISSING_FIELDS: &str = "All fields are required";
pub const UPDATE_MISSING_FIELDS: &str = "Required fields are missing";
pub const ARTWORK_NOT_FOUND: &str = "Artwork not found";

fn not_found() -> Error {
    Error::NotFound(ARTWORK_NOT_FOUND.to_string())
}

#[derive(Clone)]
pub struct ArtworkRepository {
    store: Arc<dyn ArtworkStore>,
    blobs: Arc<dyn BlobStore>,
    slug_lookup: SlugLookup,
}

impl ArtworkRepository {
    pub fn new(
        store: Arc<dyn ArtworkStore>,
        blobs: Arc<dyn BlobStore>,
        slug_lookup: SlugLookup,
    ) -> Self {
        Self {
            store,
            blobs,
            slug_lookup,
        }
    }

    pub fn slug_lookup(&self) -> SlugLookup {
        self.slug_lookup
    }

    /// All artworks in display order
    pub async fn list_all(&self) -> Result<Vec<Artwork>> {
        Ok(self.store.select_all().await?)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Artwork> {
        self.store.select_by_id(id).await?.ok_or_else(not_found)
    }

    /// Resolve a gallery slug according to the configured lookup mode
    pub async fn get_by_slug(&self, slug: &str) -> Result<Artwork> {
        match self.slug_lookup {
            SlugLookup::Canonical => self.store.select_by_slug(slug).await?.ok_or_else(not_found),
            SlugLookup::Legacy => {
                let title = slug_to_title(slug);
                let mut matches = self.store.select_by_title_ci(&title).await?;
                match matches.len() {
                    1 => Ok(matches.remove(0)),
                    0 => Err(not_found()),
                    n => {
                        tracing::warn!(slug, title = %title, matches = n, "Ambiguous legacy slug lookup");
                        Err(not_found())
                    }
                }
            }
        }
    }

    /// Upload the image and append a new artwork at the end of the gallery
    pub async fn create(&self, draft: &ArtworkDraft, image: Option<ImageUpload>) -> Result<Artwork> {
        let fields = draft.validate(CREATE_MISSING_FIELDS)?;
        let image = image
            .filter(|i| !i.is_empty())
            .ok_or_else(|| Error::Validation(CREATE_MISSING_FIELDS.to_string()))?;

        let slug = generate_slug(&fields.title);
        let now = Utc::now();
        let path = format!(
            "artworks/{}-{}.{}",
            slug,
            now.timestamp_millis(),
            image.extension()
        );
        let image_url = self.upload(&path, image).await?;

        let position = i32::try_from(self.store.count().await?)
            .map_err(|_| Error::Internal("artwork count exceeds position range".to_string()))?;

        let artwork = Artwork {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            measurements: fields.measurements,
            techniques: fields.techniques,
            availability: fields.availability,
            image_url,
            slug,
            position,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert(&artwork).await?;
        tracing::info!(artwork_id = %created.id, position, "Artwork created");
        Ok(created)
    }

    /// Replace all editable fields; a missing or empty image keeps the current one.
    ///
    /// `position` is zero-based and written as given.
    pub async fn update(
        &self,
        id: Uuid,
        draft: &ArtworkDraft,
        position: i32,
        image: Option<ImageUpload>,
    ) -> Result<Artwork> {
        let fields = draft.validate(UPDATE_MISSING_FIELDS)?;
        if position < 0 {
            return Err(Error::Validation("Position must not be negative".to_string()));
        }

        // Checked before uploading so a stale id never leaves an orphaned blob
        let existing = self.get_by_id(id).await?;

        let slug = generate_slug(&fields.title);
        let image_url = match image.filter(|i| !i.is_empty()) {
            Some(image) => {
                let path = format!(
                    "artworks/{}-{}-{}.{}",
                    slug,
                    id,
                    Utc::now().timestamp_millis(),
                    image.extension()
                );
                Some(self.upload(&path, image).await?)
            }
            None => None,
        };

        let changes = ArtworkChanges {
            fields,
            slug,
            position,
            image_url,
            updated_at: Utc::now(),
        };

        let updated = self.store.update(id, &changes).await?.ok_or_else(not_found)?;
        tracing::info!(
            artwork_id = %id,
            position,
            image_replaced = updated.image_url != existing.image_url,
            "Artwork updated"
        );
        Ok(updated)
    }

    /// Remove an artwork and close the gap it leaves in the ordering.
    ///
    /// A failed compaction is logged only; reads tolerate gaps.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(artwork_id = %id, "Artwork deleted");

        match self.compact_positions().await {
            Ok(0) => {}
            Ok(moved) => tracing::debug!(moved, "Positions compacted after delete"),
            Err(e) => tracing::error!(error = %e, "Failed to compact positions after delete"),
        }
        Ok(())
    }

    /// Renumber all artworks to 0..N-1, keeping their relative order.
    /// Returns how many records moved.
    pub async fn compact_positions(&self) -> Result<usize> {
        let ordered = self.store.select_all().await?;
        let plan = compaction_plan(&ordered);
        let now = Utc::now();

        for update in &plan {
            self.store
                .update_position(update.id, update.position, now)
                .await?;
        }
        Ok(plan.len())
    }

    /// Apply position updates in order, stopping at the first failure.
    ///
    /// Updates applied before the failure stay applied; the error reports
    /// how far the batch got.
    pub async fn reposition_bulk(&self, updates: &[PositionUpdate]) -> Result<()> {
        if let Some(bad) = updates.iter().find(|u| u.position < 0) {
            return Err(Error::Validation(format!(
                "Invalid position {} for artwork {}",
                bad.position, bad.id
            )));
        }

        let total = updates.len();
        let now = Utc::now();

        for (applied, update) in updates.iter().enumerate() {
            let reason = match self
                .store
                .update_position(update.id, update.position, now)
                .await
            {
                Ok(true) => continue,
                Ok(false) => format!("artwork {} not found", update.id),
                Err(e) => e.to_string(),
            };
            return Err(Error::PartialFailure {
                applied,
                total,
                reason,
            });
        }

        tracing::info!(count = total, "Artwork positions updated");
        Ok(())
    }

    async fn upload(&self, path: &str, image: ImageUpload) -> Result<String> {
        let content_type = image
            .content_type
            .clone()
            .unwrap_or_else(|| lindenau_storage::content_type_for(&image.filename).to_string());

        self.blobs
            .put(path, image.bytes, Some(content_type.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(path, error = %e, "Image upload failed");
                Error::Upstream(format!("Image upload failed: {e}"))
            })
    }
}
