//! Admin gallery list: drag-and-drop ordering and deletion
//!
//! Holds a client-side copy of the gallery. Moves are applied locally first
//! and then persisted; when persisting fails the list is re-read from the
//! repository instead of being rolled back.

use std::sync::Arc;

use uuid::Uuid;

use super::gateway::{ArtworkGateway, DELETE_FAILED, REPOSITION_FAILED};
use super::notify::{Notifier, Toast};
use crate::domain::entities::{Artwork, AvailabilityFilter};
use crate::domain::ordering::{move_item, position_updates, renumber};

/// Result of a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing moved, nothing was sent
    Ignored,
    /// New order persisted
    Saved,
    /// Persisting failed; the list was reloaded from the repository
    Resynced,
}

pub struct GalleryAdmin {
    gateway: Arc<dyn ArtworkGateway>,
    notifier: Notifier,
    artworks: Vec<Artwork>,
    filter: AvailabilityFilter,
    loading: bool,
    saving: bool,
}

impl GalleryAdmin {
    pub fn new(gateway: Arc<dyn ArtworkGateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            artworks: Vec::new(),
            filter: AvailabilityFilter::All,
            loading: false,
            saving: false,
        }
    }

    /// Full list in gallery order
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn filter(&self) -> AvailabilityFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: AvailabilityFilter) {
        self.filter = filter;
    }

    /// Artworks shown under the current tab
    pub fn visible(&self) -> Vec<&Artwork> {
        self.filter.apply(&self.artworks)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Replace the local list with the repository's
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = self.gateway.list_all().await;
        self.loading = false;

        match result {
            Ok(artworks) => {
                self.artworks = artworks;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load artworks");
                self.notifier.notify(Toast::error("Failed to load artworks"));
                false
            }
        }
    }

    /// Handle a finished drag over the visible list.
    ///
    /// `source` and `destination` index the current tab; under a filter they
    /// are mapped onto the full list so positions stay gallery-global.
    pub async fn on_drag_end(&mut self, source: usize, destination: Option<usize>) -> DragOutcome {
        let Some(destination) = destination else {
            return DragOutcome::Ignored;
        };
        if destination == source {
            return DragOutcome::Ignored;
        }
        let (Some(from), Some(to)) = (self.full_index(source), self.full_index(destination))
        else {
            tracing::debug!(source, destination, "Drag indices outside the visible list");
            return DragOutcome::Ignored;
        };

        if !move_item(&mut self.artworks, from, to) {
            return DragOutcome::Ignored;
        }
        renumber(&mut self.artworks);

        self.saving = true;
        let response = self
            .gateway
            .reposition_bulk(&position_updates(&self.artworks))
            .await;
        self.saving = false;

        if response.success {
            self.notifier
                .notify(Toast::success("Artwork positions updated"));
            DragOutcome::Saved
        } else {
            self.notifier.notify(Toast::error(
                response
                    .message
                    .unwrap_or_else(|| REPOSITION_FAILED.to_string()),
            ));
            self.load().await;
            DragOutcome::Resynced
        }
    }

    /// Delete through the repository and drop the artwork locally on success
    pub async fn delete(&mut self, id: Uuid) -> bool {
        let response = self.gateway.delete(id).await;

        if response.success {
            self.artworks.retain(|a| a.id != id);
            // Mirrors the compaction the repository just ran
            renumber(&mut self.artworks);
            self.notifier
                .notify(Toast::success("Artwork deleted successfully"));
            true
        } else {
            self.notifier.notify(Toast::error(
                response
                    .message
                    .unwrap_or_else(|| DELETE_FAILED.to_string()),
            ));
            false
        }
    }

    fn full_index(&self, visible_index: usize) -> Option<usize> {
        self.artworks
            .iter()
            .enumerate()
            .filter(|(_, a)| self.filter.matches(a))
            .map(|(index, _)| index)
            .nth(visible_index)
    }
}
