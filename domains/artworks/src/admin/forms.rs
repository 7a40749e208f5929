//! Create and edit forms for the admin client

use std::sync::Arc;

use lindenau_common::Result;
use uuid::Uuid;

use super::gateway::{ArtworkGateway, CREATE_FAILED, UPDATE_FAILED};
use super::notify::{Notifier, Toast};
use crate::domain::entities::{ArtworkDraft, ImageUpload};
use crate::repository::artworks::{CREATE_MISSING_FIELDS, UPDATE_MISSING_FIELDS};

/// Where the client goes after a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    AdminList,
}

/// What the image slot of a form currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    None,
    /// Image already stored for the artwork
    Stored(String),
    /// Newly selected file, not uploaded yet
    Selected(String),
}

pub struct CreateArtworkForm {
    gateway: Arc<dyn ArtworkGateway>,
    notifier: Notifier,
    pub draft: ArtworkDraft,
    image: Option<ImageUpload>,
    submitting: bool,
}

impl CreateArtworkForm {
    pub fn new(gateway: Arc<dyn ArtworkGateway>, notifier: Notifier) -> Self {
        Self {
            gateway,
            notifier,
            draft: ArtworkDraft {
                availability: "Available".to_string(),
                ..ArtworkDraft::default()
            },
            image: None,
            submitting: false,
        }
    }

    pub fn select_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn preview(&self) -> ImagePreview {
        match &self.image {
            Some(image) => ImagePreview::Selected(image.filename.clone()),
            None => ImagePreview::None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the form. Incomplete input is rejected locally without calling
    /// the repository.
    pub async fn submit(&mut self) -> Option<Navigation> {
        if self.image.as_ref().is_none_or(ImageUpload::is_empty) {
            self.notifier.notify(Toast::error("Please select an image"));
            return None;
        }
        if !self.draft.is_complete() {
            self.notifier.notify(Toast::error(CREATE_MISSING_FIELDS));
            return None;
        }

        self.submitting = true;
        let response = self.gateway.create(&self.draft, self.image.clone()).await;

        if response.success {
            self.notifier
                .notify(Toast::success("Artwork added successfully"));
            Some(Navigation::AdminList)
        } else {
            self.submitting = false;
            self.notifier.notify(Toast::error(
                response.message.unwrap_or_else(|| CREATE_FAILED.to_string()),
            ));
            None
        }
    }
}

pub struct EditArtworkForm {
    gateway: Arc<dyn ArtworkGateway>,
    notifier: Notifier,
    id: Uuid,
    pub draft: ArtworkDraft,
    /// One-based, as shown to the admin
    position: i32,
    total: i32,
    stored_image_url: String,
    new_image: Option<ImageUpload>,
    submitting: bool,
}

impl EditArtworkForm {
    /// Preload the form from the stored artwork
    pub async fn load(
        gateway: Arc<dyn ArtworkGateway>,
        notifier: Notifier,
        id: Uuid,
    ) -> Result<Self> {
        let loaded = async {
            let artwork = gateway.get_by_id(id).await?;
            let total = gateway.list_all().await?.len();
            Ok::<_, lindenau_common::Error>((artwork, total))
        }
        .await;

        let (artwork, total) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::error!(artwork_id = %id, error = %e, "Failed to load artwork");
                notifier.notify(Toast::error("Failed to load artwork"));
                return Err(e);
            }
        };

        let total = i32::try_from(total).unwrap_or(i32::MAX);
        // Stored positions may have gaps; the form only offers [1, total]
        let position = artwork.position.saturating_add(1).clamp(1, total.max(1));

        Ok(Self {
            draft: ArtworkDraft::from(&artwork),
            position,
            total,
            stored_image_url: artwork.image_url,
            new_image: None,
            submitting: false,
            gateway,
            notifier,
            id,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// One-based position shown in the form
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Set the one-based position, clamped into `[1, total]`
    pub fn set_position(&mut self, position: i32) {
        self.position = position.clamp(1, self.total.max(1));
    }

    pub fn select_image(&mut self, image: ImageUpload) {
        self.new_image = Some(image);
    }

    pub fn preview(&self) -> ImagePreview {
        match &self.new_image {
            Some(image) => ImagePreview::Selected(image.filename.clone()),
            None => ImagePreview::Stored(self.stored_image_url.clone()),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit the edit. Without a newly selected image an empty payload is
    /// sent, which keeps the stored image.
    pub async fn submit(&mut self) -> Option<Navigation> {
        if !self.draft.is_complete() {
            self.notifier.notify(Toast::error(UPDATE_MISSING_FIELDS));
            return None;
        }

        self.submitting = true;
        let image = self.new_image.clone().unwrap_or_default();
        let response = self
            .gateway
            .update(self.id, &self.draft, self.position - 1, Some(image))
            .await;

        if response.success {
            self.notifier
                .notify(Toast::success("Artwork updated successfully"));
            Some(Navigation::AdminList)
        } else {
            self.submitting = false;
            self.notifier.notify(Toast::error(
                response.message.unwrap_or_else(|| UPDATE_FAILED.to_string()),
            ));
            None
        }
    }
}
