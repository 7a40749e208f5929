//! Artworks domain state and auth backend integration

use crate::ArtworkRepository;
use axum::extract::FromRef;
use lindenau_auth::AuthBackend;

/// Application state for the Artworks domain
#[derive(Clone)]
pub struct ArtworksState {
    pub artworks: ArtworkRepository,
    pub auth: AuthBackend,
}

impl FromRef<ArtworksState> for AuthBackend {
    fn from_ref(state: &ArtworksState) -> Self {
        state.auth.clone()
    }
}
