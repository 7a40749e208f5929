//! Postgres Artwork Store on the `gallery_images` table

use chrono::{DateTime, Utc};
use lindenau_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{ArtworkChanges, ArtworkStore, StoreResult};
use crate::domain::entities::Artwork;

/// All columns in the gallery_images table, used for SELECT and RETURNING clauses.
const ARTWORK_COLUMNS: &str = "\
    id, title, description, measurements, techniques, \
    availability, image_url, slug, position, \
    created_at, updated_at";

/// SET expression keeping `updated_at` strictly increasing when the clock lags
fn next_updated_at(param: &str) -> String {
    format!("GREATEST({param}, updated_at + INTERVAL '1 microsecond')")
}

#[derive(Debug, sqlx::FromRow)]
struct ArtworkRow {
    id: Uuid,
    title: String,
    description: String,
    measurements: String,
    techniques: String,
    availability: String,
    image_url: String,
    slug: String,
    position: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArtworkRow> for Artwork {
    type Error = RepositoryError;

    fn try_from(row: ArtworkRow) -> Result<Self, Self::Error> {
        let availability = row.availability.parse().map_err(|_| {
            RepositoryError::InvalidData(format!(
                "artwork {} has unknown availability {:?}",
                row.id, row.availability
            ))
        })?;

        Ok(Artwork {
            id: row.id,
            title: row.title,
            description: row.description,
            measurements: row.measurements,
            techniques: row.techniques,
            availability,
            image_url: row.image_url,
            slug: row.slug,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_artworks(rows: Vec<ArtworkRow>) -> StoreResult<Vec<Artwork>> {
    rows.into_iter().map(Artwork::try_from).collect()
}

#[derive(Clone)]
pub struct PgArtworkStore {
    pool: PgPool,
}

impl PgArtworkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ArtworkStore for PgArtworkStore {
    async fn select_all(&self) -> StoreResult<Vec<Artwork>> {
        let query = format!(
            "SELECT {ARTWORK_COLUMNS} FROM gallery_images ORDER BY position ASC, created_at ASC"
        );
        let rows = sqlx::query_as::<_, ArtworkRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        into_artworks(rows)
    }

    async fn select_by_id(&self, id: Uuid) -> StoreResult<Option<Artwork>> {
        let query = format!("SELECT {ARTWORK_COLUMNS} FROM gallery_images WHERE id = $1");
        let row = sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Artwork::try_from).transpose()
    }

    async fn select_by_slug(&self, slug: &str) -> StoreResult<Option<Artwork>> {
        let query = format!(
            "SELECT {ARTWORK_COLUMNS} FROM gallery_images WHERE slug = $1 \
             ORDER BY position ASC, created_at ASC LIMIT 1"
        );
        let row = sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Artwork::try_from).transpose()
    }

    async fn select_by_title_ci(&self, title: &str) -> StoreResult<Vec<Artwork>> {
        let query = format!(
            "SELECT {ARTWORK_COLUMNS} FROM gallery_images WHERE lower(title) = lower($1) \
             ORDER BY position ASC, created_at ASC"
        );
        let rows = sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(title)
            .fetch_all(&self.pool)
            .await?;

        into_artworks(rows)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gallery_images")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(&self, artwork: &Artwork) -> StoreResult<Artwork> {
        let query = format!(
            "INSERT INTO gallery_images ({ARTWORK_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {ARTWORK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(artwork.id)
            .bind(&artwork.title)
            .bind(&artwork.description)
            .bind(&artwork.measurements)
            .bind(&artwork.techniques)
            .bind(artwork.availability.as_str())
            .bind(&artwork.image_url)
            .bind(&artwork.slug)
            .bind(artwork.position)
            .bind(artwork.created_at)
            .bind(artwork.updated_at)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, changes: &ArtworkChanges) -> StoreResult<Option<Artwork>> {
        let query = format!(
            "UPDATE gallery_images SET \
             title = $2, description = $3, measurements = $4, techniques = $5, \
             availability = $6, slug = $7, position = $8, \
             image_url = COALESCE($9, image_url), \
             updated_at = {} \
             WHERE id = $1 RETURNING {ARTWORK_COLUMNS}",
            next_updated_at("$10")
        );
        let row = sqlx::query_as::<_, ArtworkRow>(&query)
            .bind(id)
            .bind(&changes.fields.title)
            .bind(&changes.fields.description)
            .bind(&changes.fields.measurements)
            .bind(&changes.fields.techniques)
            .bind(changes.fields.availability.as_str())
            .bind(&changes.slug)
            .bind(changes.position)
            .bind(changes.image_url.as_deref())
            .bind(changes.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Artwork::try_from).transpose()
    }

    async fn update_position(
        &self,
        id: Uuid,
        position: i32,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let query = format!(
            "UPDATE gallery_images SET position = $2, updated_at = {} WHERE id = $1",
            next_updated_at("$3")
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(position)
            .bind(updated_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
