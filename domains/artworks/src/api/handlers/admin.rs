//! Admin write handlers
//!
//! Every handler answers with the `{success, message?}` envelope; the HTTP
//! status still reflects the error class.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use lindenau_auth::AdminUser;
use lindenau_common::{ActionResponse, Error, Result};
use uuid::Uuid;

use crate::admin::gateway::{ArtworkGateway, CREATE_FAILED, REPOSITION_FAILED, UPDATE_FAILED};
use crate::api::middleware::ArtworksState;
use crate::domain::entities::{ArtworkDraft, ImageUpload, PositionUpdate};
use crate::repository::artworks::UPDATE_MISSING_FIELDS;

/// Fields of the create/edit multipart form
#[derive(Debug, Default)]
pub struct ArtworkForm {
    pub draft: ArtworkDraft,
    /// One-based position as typed by the admin (edit only)
    pub position: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ArtworkForm {
    /// Zero-based position from the one-based form value
    pub fn zero_based_position(&self) -> Result<i32> {
        let raw = self
            .position
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::Validation(UPDATE_MISSING_FIELDS.to_string()))?;

        let one_based: i32 = raw
            .parse()
            .map_err(|_| Error::Validation(format!("Invalid position: {raw}")))?;

        Ok(one_based.saturating_sub(1))
    }
}

fn form_error(e: MultipartError) -> Error {
    Error::Validation(format!("Invalid form data: {}", e.body_text()))
}

/// Read the multipart form, ignoring unknown fields
pub async fn read_artwork_form(mut multipart: Multipart) -> Result<ArtworkForm> {
    let mut form = ArtworkForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .filter(|ct| *ct != "application/octet-stream")
                    .map(str::to_string);
                let bytes = field.bytes().await.map_err(form_error)?;
                form.image = Some(ImageUpload::new(filename, content_type, bytes.to_vec()));
            }
            "title" => form.draft.title = field.text().await.map_err(form_error)?,
            "description" => form.draft.description = field.text().await.map_err(form_error)?,
            "measurements" => form.draft.measurements = field.text().await.map_err(form_error)?,
            "techniques" => form.draft.techniques = field.text().await.map_err(form_error)?,
            "availability" => form.draft.availability = field.text().await.map_err(form_error)?,
            "position" => form.position = Some(field.text().await.map_err(form_error)?),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Create an artwork from a multipart form
pub async fn create_artwork(
    AdminUser(admin): AdminUser,
    State(state): State<ArtworksState>,
    multipart: Multipart,
) -> ActionResponse {
    let form = match read_artwork_form(multipart).await {
        Ok(form) => form,
        Err(e) => return ActionResponse::from_error(e, CREATE_FAILED),
    };

    tracing::info!(admin = %admin.display_name(), title = %form.draft.title, "Creating artwork");

    let response = ArtworkGateway::create(&state.artworks, &form.draft, form.image).await;
    if response.success {
        response.with_status(StatusCode::CREATED)
    } else {
        response
    }
}

/// Update an artwork; an empty or missing image keeps the stored one
pub async fn update_artwork(
    AdminUser(admin): AdminUser,
    State(state): State<ArtworksState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> ActionResponse {
    let parsed = async {
        let form = read_artwork_form(multipart).await?;
        let position = form.zero_based_position()?;
        Ok::<_, Error>((form, position))
    }
    .await;

    let (form, position) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return ActionResponse::from_error(e, UPDATE_FAILED),
    };

    tracing::info!(admin = %admin.display_name(), artwork_id = %id, "Updating artwork");

    ArtworkGateway::update(&state.artworks, id, &form.draft, position, form.image).await
}

pub async fn delete_artwork(
    AdminUser(admin): AdminUser,
    State(state): State<ArtworksState>,
    Path(id): Path<Uuid>,
) -> ActionResponse {
    tracing::info!(admin = %admin.display_name(), artwork_id = %id, "Deleting artwork");

    ArtworkGateway::delete(&state.artworks, id).await
}

/// Persist a new gallery order
pub async fn update_positions(
    AdminUser(admin): AdminUser,
    State(state): State<ArtworksState>,
    payload: std::result::Result<Json<Vec<PositionUpdate>>, JsonRejection>,
) -> ActionResponse {
    let updates = match payload {
        Ok(Json(updates)) => updates,
        Err(rejection) => {
            return ActionResponse::from_error(
                Error::Validation(rejection.body_text()),
                REPOSITION_FAILED,
            )
        }
    };

    tracing::info!(admin = %admin.display_name(), count = updates.len(), "Repositioning artworks");

    ArtworkGateway::reposition_bulk(&state.artworks, &updates).await
}
