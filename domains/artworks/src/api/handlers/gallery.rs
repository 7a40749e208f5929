//! Public gallery read handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use lindenau_common::Result;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::ArtworksState;
use crate::domain::entities::{Artwork, AvailabilityFilter};

#[derive(Debug, Default, Deserialize)]
pub struct ListArtworksQuery {
    #[serde(default)]
    pub availability: AvailabilityFilter,
}

/// List artworks in gallery order, optionally narrowed by availability
pub async fn list_artworks(
    State(state): State<ArtworksState>,
    Query(query): Query<ListArtworksQuery>,
) -> Result<Json<Vec<Artwork>>> {
    let artworks = state.artworks.list_all().await?;
    let filtered = artworks
        .into_iter()
        .filter(|a| query.availability.matches(a))
        .collect();

    Ok(Json(filtered))
}

pub async fn get_artwork(
    State(state): State<ArtworksState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Artwork>> {
    Ok(Json(state.artworks.get_by_id(id).await?))
}

/// Gallery detail page lookup
pub async fn get_artwork_by_slug(
    State(state): State<ArtworksState>,
    Path(slug): Path<String>,
) -> Result<Json<Artwork>> {
    Ok(Json(state.artworks.get_by_slug(&slug).await?))
}
