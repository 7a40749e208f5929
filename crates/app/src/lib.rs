//! Lindenau application composition root
//!
//! Composes the artworks and contact routers into a single application.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use lindenau_artworks::{
    api::routes::MAX_UPLOAD_BYTES, ArtworkRepository, ArtworkStore, ArtworksState,
    InMemoryArtworkStore, PgArtworkStore,
};
use lindenau_auth::{AuthBackend, AuthConfig};
use lindenau_common::Config;
use lindenau_contact::ContactState;
use lindenau_email::{EmailConfig, EmailService, EmailServiceFactory};
use lindenau_storage::{BlobStore, BlobStoreFactory, StorageConfig};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// External collaborators the routers are built on
#[derive(Clone)]
pub struct AppServices {
    pub artworks: Arc<dyn ArtworkStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub email: Arc<dyn EmailService>,
}

impl AppServices {
    /// Build every collaborator from configuration and the environment
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let artworks = connect_artwork_store(config.database_url.as_deref()).await?;

        let blobs = BlobStoreFactory::create(StorageConfig::from_env()?).await?;
        let email = EmailServiceFactory::create(EmailConfig::from_env()?).await?;

        Ok(Self {
            artworks,
            blobs: Arc::from(blobs),
            email: Arc::from(email),
        })
    }
}

/// Postgres when a URL is configured, otherwise an empty in-memory store
pub async fn connect_artwork_store(
    database_url: Option<&str>,
) -> anyhow::Result<Arc<dyn ArtworkStore>> {
    let Some(url) = database_url else {
        tracing::warn!("DATABASE_URL not set, artworks are kept in memory only");
        return Ok(Arc::new(InMemoryArtworkStore::new()));
    };

    let pool = PgPool::connect(url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Database connection established");
    Ok(Arc::new(PgArtworkStore::new(pool)))
}

/// Create the main application router from configuration
pub async fn create_app(config: &Config) -> anyhow::Result<Router> {
    let services = AppServices::from_config(config).await?;
    Ok(build_router(config, services))
}

/// Compose domain routers over the given collaborators
pub fn build_router(config: &Config, services: AppServices) -> Router {
    let auth = AuthBackend::new(AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
        admin_emails: config.admin_emails.clone(),
    });

    let artworks_state = ArtworksState {
        artworks: ArtworkRepository::new(services.artworks, services.blobs, config.slug_lookup),
        auth,
    };
    let contact_state = ContactState {
        email: services.email,
    };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { concat!("Lindenau API v", env!("CARGO_PKG_VERSION")) }),
        )
        .merge(lindenau_artworks::routes().with_state(artworks_state))
        .merge(lindenau_contact::routes().with_state(contact_state))
}

/// CORS for the deployed site: comma-separated origins, or `*` for any
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let allow_origin = if origins.split(',').any(|o| o.trim() == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Request body cap; admin uploads are the largest bodies
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES + 64 * 1024)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
