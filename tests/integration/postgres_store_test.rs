//! Postgres artwork store against a real database
//!
//! Ignored by default. Run with `TEST_DATABASE_URL` pointing at a scratch
//! database: `cargo test -p lindenau-integration-tests -- --ignored`

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use lindenau_artworks::{ArtworkRepository, ArtworkStore, Availability, PgArtworkStore};
use lindenau_common::SlugLookup;
use lindenau_storage::mock::MockBlobStore;
use sqlx::PgPool;

use crate::common::{ArtworkFixture, TestConfig};

async fn store() -> Result<(PgPool, PgArtworkStore)> {
    let config = TestConfig::from_env();
    let url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("TEST_DATABASE_URL is required"))?;

    let pool = PgPool::connect(&url).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    sqlx::query("DELETE FROM gallery_images").execute(&pool).await?;

    Ok((pool.clone(), PgArtworkStore::new(pool)))
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_rows_round_trip_in_position_order() -> Result<()> {
    let (_pool, store) = store().await?;

    for artwork in ArtworkFixture::gallery(&["A", "B", "C"]).iter().rev() {
        store.insert(artwork).await?;
    }

    let titles: Vec<String> = store
        .select_all()
        .await?
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, ["A", "B", "C"]);
    assert_eq!(store.count().await?, 3);
    Ok(())
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_updated_at_never_moves_backwards() -> Result<()> {
    let (_pool, store) = store().await?;
    let artwork = store
        .insert(&ArtworkFixture::at("A", Availability::Sold, 0))
        .await?;

    let stale = artwork.updated_at - Duration::hours(1);
    assert!(store.update_position(artwork.id, 4, stale).await?);

    let reloaded = store.select_by_id(artwork.id).await?.unwrap();
    assert_eq!(reloaded.position, 4);
    assert_eq!(reloaded.availability, Availability::Sold);
    assert!(reloaded.updated_at > artwork.updated_at);
    Ok(())
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_title_lookup_ignores_case() -> Result<()> {
    let (_pool, store) = store().await?;
    store
        .insert(&ArtworkFixture::at("Quiet Morning", Availability::Available, 0))
        .await?;

    let found = store.select_by_title_ci("QUIET morning").await?;
    assert_eq!(found.len(), 1);
    assert!(store.select_by_slug("quiet-morning").await?.is_some());
    Ok(())
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_delete_compacts_through_repository() -> Result<()> {
    let (_pool, store) = store().await?;
    let rows = ArtworkFixture::gallery(&["A", "B", "C"]);
    for artwork in &rows {
        store.insert(artwork).await?;
    }

    let repository = ArtworkRepository::new(
        Arc::new(store),
        Arc::new(MockBlobStore::new()),
        SlugLookup::Canonical,
    );
    repository.delete(rows[1].id).await?;

    let remaining = repository.list_all().await?;
    assert_eq!(
        remaining
            .iter()
            .map(|a| (a.title.as_str(), a.position))
            .collect::<Vec<_>>(),
        [("A", 0), ("C", 1)]
    );
    assert!(remaining[1].updated_at <= Utc::now() + Duration::seconds(1));
    Ok(())
}
