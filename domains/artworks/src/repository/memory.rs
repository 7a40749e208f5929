//! In-memory Artwork Store for tests and local runs without Postgres

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lindenau_common::RepositoryError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{ArtworkChanges, ArtworkStore, StoreResult};
use crate::domain::entities::{next_updated_at, Artwork};

/// Position-update budget meaning "never fail"
const UNLIMITED: i64 = -1;

#[derive(Debug, Clone)]
pub struct InMemoryArtworkStore {
    rows: Arc<RwLock<Vec<Artwork>>>,
    position_budget: Arc<AtomicI64>,
}

impl Default for InMemoryArtworkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryArtworkStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Seed the store with existing rows
    pub fn with_rows(rows: Vec<Artwork>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            position_budget: Arc::new(AtomicI64::new(UNLIMITED)),
        }
    }

    /// Make every position update fail (or succeed again)
    pub fn set_failing_positions(&self, failing: bool) {
        let budget = if failing { 0 } else { UNLIMITED };
        self.position_budget.store(budget, Ordering::SeqCst);
    }

    /// Let `count` more position updates through, then fail the rest
    pub fn fail_positions_after(&self, count: usize) {
        self.position_budget.store(count as i64, Ordering::SeqCst);
    }

    fn take_position_budget(&self) -> bool {
        self.position_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                UNLIMITED => Some(UNLIMITED),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok()
    }

    fn sorted(mut rows: Vec<Artwork>) -> Vec<Artwork> {
        rows.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.created_at.cmp(&b.created_at))
        });
        rows
    }
}

#[async_trait::async_trait]
impl ArtworkStore for InMemoryArtworkStore {
    async fn select_all(&self) -> StoreResult<Vec<Artwork>> {
        Ok(Self::sorted(self.rows.read().await.clone()))
    }

    async fn select_by_id(&self, id: Uuid) -> StoreResult<Option<Artwork>> {
        Ok(self.rows.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn select_by_slug(&self, slug: &str) -> StoreResult<Option<Artwork>> {
        let matching = self
            .rows
            .read()
            .await
            .iter()
            .filter(|a| a.slug == slug)
            .cloned()
            .collect();
        Ok(Self::sorted(matching).into_iter().next())
    }

    async fn select_by_title_ci(&self, title: &str) -> StoreResult<Vec<Artwork>> {
        let wanted = title.to_lowercase();
        let matching = self
            .rows
            .read()
            .await
            .iter()
            .filter(|a| a.title.to_lowercase() == wanted)
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn insert(&self, artwork: &Artwork) -> StoreResult<Artwork> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|a| a.id == artwork.id) {
            return Err(RepositoryError::InvalidData(format!(
                "duplicate artwork id {}",
                artwork.id
            )));
        }
        rows.push(artwork.clone());
        Ok(artwork.clone())
    }

    async fn update(&self, id: Uuid, changes: &ArtworkChanges) -> StoreResult<Option<Artwork>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        row.title = changes.fields.title.clone();
        row.description = changes.fields.description.clone();
        row.measurements = changes.fields.measurements.clone();
        row.techniques = changes.fields.techniques.clone();
        row.availability = changes.fields.availability;
        row.slug = changes.slug.clone();
        row.position = changes.position;
        if let Some(url) = &changes.image_url {
            row.image_url = url.clone();
        }
        row.updated_at = next_updated_at(row.updated_at, changes.updated_at);

        Ok(Some(row.clone()))
    }

    async fn update_position(
        &self,
        id: Uuid,
        position: i32,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        if !self.take_position_budget() {
            return Err(RepositoryError::Unavailable(
                "position updates disabled".to_string(),
            ));
        }

        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|a| a.id == id) {
            Some(row) => {
                row.position = position;
                row.updated_at = next_updated_at(row.updated_at, updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }
}
