//! Artwork gallery workflows through the composed application router
//!
//! Covers the public gallery reads and every admin write:
//! - POST /api/admin/artworks - Create artwork
//! - PUT /api/admin/artworks/{id} - Update artwork
//! - DELETE /api/admin/artworks/{id} - Delete artwork
//! - PUT /api/admin/artworks/positions - Persist a new order

mod common;

use axum::http::{Method, StatusCode};
use lindenau_artworks::Availability;
use serde_json::json;
use uuid::Uuid;

use crate::common::{
    artwork_fields, multipart_body, multipart_request, positions, titles, ArtworkFixture,
    TestApp,
};

mod test_create_artwork {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_created_artworks_are_appended_in_order() {
        let app = TestApp::new();

        for title in ["Harbour", "Dunes", "Pines"] {
            let (status, body) = app.create_artwork(title, "Available").await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body, json!({"success": true}));
        }

        let gallery = app.gallery().await;
        assert_eq!(titles(&gallery), ["Harbour", "Dunes", "Pines"]);
        assert_eq!(positions(&gallery), [0, 1, 2]);
        assert_eq!(app.blobs.blob_count(), 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_image_is_uploaded_under_slug_path() {
        let app = TestApp::new();

        app.create_artwork("Evening Light!", "Sold").await;

        let paths = app.blobs.paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with("artworks/evening-light-"));
        assert!(paths[0].ends_with(".jpg"));

        let gallery = app.gallery().await;
        assert_eq!(gallery[0]["slug"], "evening-light");
        assert_eq!(gallery[0]["availability"], "Sold");
        assert_eq!(
            gallery[0]["image_url"],
            format!("mock://blobs/{}", paths[0])
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_blank_field_writes_nothing() {
        let app = TestApp::new();
        let mut fields = artwork_fields("Harbour", "Available");
        fields[1] = ("description", "   ");

        let response = app
            .send(multipart_request(
                Method::POST,
                "/api/admin/artworks",
                &app.admin_token(),
                multipart_body(&fields, Some(("a.jpg", b"jpeg"))),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            common::body_json(response).await,
            json!({"success": false, "message": "All fields are required"})
        );

        assert!(app.gallery().await.is_empty());
        assert_eq!(app.blobs.blob_count(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_availability_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app.create_artwork("Harbour", "Reserved").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(app.gallery().await.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_storage_outage_inserts_nothing() {
        let app = TestApp::new();
        app.blobs.set_failing(true);

        let (status, body) = app.create_artwork("Harbour", "Available").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to create artwork");

        assert!(app.gallery().await.is_empty());
    }
}

mod test_update_artwork {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_update_without_image_keeps_stored_url() {
        let rows = ArtworkFixture::gallery(&["A", "B"]);
        let target = rows[0].clone();
        let app = TestApp::with_rows(rows);

        let mut fields = artwork_fields("A Renamed", "Sold");
        fields.push(("position", "1"));
        let response = app
            .send(multipart_request(
                Method::PUT,
                &format!("/api/admin/artworks/{}", target.id),
                &app.admin_token(),
                multipart_body(&fields, None),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let (_, body) = app.get(&format!("/api/artworks/{}", target.id)).await;
        assert_eq!(body["title"], "A Renamed");
        assert_eq!(body["slug"], "a-renamed");
        assert_eq!(body["availability"], "Sold");
        assert_eq!(body["position"], 0);
        assert_eq!(body["image_url"], target.image_url);
        assert_eq!(app.blobs.blob_count(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_update_with_image_replaces_url() {
        let rows = ArtworkFixture::gallery(&["A"]);
        let target = rows[0].clone();
        let app = TestApp::with_rows(rows);

        let mut fields = artwork_fields("A", "Available");
        fields.push(("position", "1"));
        app.send(multipart_request(
            Method::PUT,
            &format!("/api/admin/artworks/{}", target.id),
            &app.admin_token(),
            multipart_body(&fields, Some(("new.png", b"png-bytes"))),
        ))
        .await;

        let (_, body) = app.get(&format!("/api/artworks/{}", target.id)).await;
        let url = body["image_url"].as_str().unwrap();
        assert_ne!(url, target.image_url);
        assert!(url.contains(&target.id.to_string()));
        assert!(url.ends_with(".png"));
    }

    #[test_log::test(tokio::test)]
    async fn test_update_unknown_artwork_is_404() {
        let app = TestApp::new();

        let mut fields = artwork_fields("A", "Available");
        fields.push(("position", "1"));
        let response = app
            .send(multipart_request(
                Method::PUT,
                &format!("/api/admin/artworks/{}", Uuid::new_v4()),
                &app.admin_token(),
                multipart_body(&fields, Some(("a.jpg", b"jpeg"))),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            common::body_json(response).await,
            json!({"success": false, "message": "Artwork not found"})
        );
        assert_eq!(app.blobs.blob_count(), 0);
    }
}

mod test_delete_artwork {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_delete_middle_compacts_positions() {
        let rows = ArtworkFixture::gallery(&["A", "B", "C"]);
        let middle = rows[1].id;
        let app = TestApp::with_rows(rows);

        let (status, body) = app.delete(&format!("/api/admin/artworks/{middle}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let gallery = app.gallery().await;
        assert_eq!(titles(&gallery), ["A", "C"]);
        assert_eq!(positions(&gallery), [0, 1]);
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_succeeds_when_compaction_fails() {
        let rows = ArtworkFixture::gallery(&["A", "B", "C"]);
        let first = rows[0].id;
        let app = TestApp::with_rows(rows);
        app.store.set_failing_positions(true);

        let (status, _) = app.delete(&format!("/api/admin/artworks/{first}")).await;
        assert_eq!(status, StatusCode::OK);

        let gallery = app.gallery().await;
        assert_eq!(titles(&gallery), ["B", "C"]);
        assert_eq!(positions(&gallery), [1, 2]);
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_unknown_artwork_is_404() {
        let app = TestApp::new();

        let (status, body) = app
            .delete(&format!("/api/admin/artworks/{}", Uuid::new_v4()))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Artwork not found");
    }
}

mod test_reposition {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_bulk_positions_reorder_gallery() {
        let rows = ArtworkFixture::gallery(&["A", "B", "C"]);
        let (a, b, c) = (rows[0].id, rows[1].id, rows[2].id);
        let app = TestApp::with_rows(rows);

        let (status, body) = app
            .put_json(
                "/api/admin/artworks/positions",
                json!([
                    {"id": c, "position": 0},
                    {"id": a, "position": 1},
                    {"id": b, "position": 2},
                ]),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let gallery = app.gallery().await;
        assert_eq!(titles(&gallery), ["C", "A", "B"]);
        assert_eq!(positions(&gallery), [0, 1, 2]);
    }

    #[test_log::test(tokio::test)]
    async fn test_partial_application_is_reported() {
        let rows = ArtworkFixture::gallery(&["A", "B", "C"]);
        let (a, b, c) = (rows[0].id, rows[1].id, rows[2].id);
        let app = TestApp::with_rows(rows);
        app.store.fail_positions_after(1);

        let (status, body) = app
            .put_json(
                "/api/admin/artworks/positions",
                json!([
                    {"id": c, "position": 0},
                    {"id": a, "position": 1},
                    {"id": b, "position": 2},
                ]),
            )
            .await;
        assert!(status.is_server_error());
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "Failed to update positions: partially applied (1 of 3)"
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_negative_position_changes_nothing() {
        let rows = ArtworkFixture::gallery(&["A", "B"]);
        let (a, b) = (rows[0].id, rows[1].id);
        let app = TestApp::with_rows(rows);

        let (status, _) = app
            .put_json(
                "/api/admin/artworks/positions",
                json!([{"id": b, "position": 0}, {"id": a, "position": -1}]),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(titles(&app.gallery().await), ["A", "B"]);
    }
}

mod test_gallery_reads {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_availability_filter() {
        let app = TestApp::with_rows(vec![
            ArtworkFixture::at("A", Availability::Available, 0),
            ArtworkFixture::at("B", Availability::Sold, 1),
            ArtworkFixture::at("C", Availability::Available, 2),
        ]);

        let (_, available) = app.get("/api/artworks?availability=available").await;
        let available = available.as_array().unwrap().clone();
        assert_eq!(titles(&available), ["A", "C"]);

        let (_, sold) = app.get("/api/artworks?availability=sold").await;
        assert_eq!(titles(sold.as_array().unwrap()), ["B"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_slug_lookup_survives_punctuation() {
        let app = TestApp::with_rows(vec![ArtworkFixture::at(
            "O'Brien's Garden",
            Availability::Available,
            0,
        )]);

        let (status, body) = app.get("/api/gallery/obriens-garden").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "O'Brien's Garden");
    }

    #[test_log::test(tokio::test)]
    async fn test_legacy_slug_lookup_matches_title_case() {
        let app = TestApp::with_vars(&[("ARTWORK_SLUG_LOOKUP", "legacy")]);
        app.create_artwork("Quiet morning", "Available").await;

        let (status, body) = app.get("/api/gallery/quiet-morning").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Quiet morning");

        let (status, _) = app.get("/api/gallery/missing-piece").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn test_admin_writes_require_admin_session() {
        let app = TestApp::with_rows(ArtworkFixture::gallery(&["A"]));

        let response = app
            .send(multipart_request(
                Method::POST,
                "/api/admin/artworks",
                &app.token_for("visitor@example.com"),
                multipart_body(&artwork_fields("B", "Available"), Some(("b.jpg", b"jpeg"))),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(app.gallery().await.len(), 1);
    }
}
