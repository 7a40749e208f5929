//! Common test utilities and fixtures for integration tests
//!
//! Builds the full application router over in-memory collaborators and
//! mints session tokens for the admin routes.

#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use lindenau_app::{build_router, AppServices};
use lindenau_artworks::{generate_slug, Artwork, Availability, InMemoryArtworkStore};
use lindenau_auth::SupabaseClaims;
use lindenau_common::Config;
use lindenau_email::mock::MockEmailService;
use lindenau_storage::mock::MockBlobStore;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

static INIT: Once = Once::new();

pub const ADMIN_EMAIL: &str = "studio@example.com";
const BOUNDARY: &str = "lindenau-integration-boundary";

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub database_url: Option<String>,
    pub jwt_secret: String,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        Self {
            database_url: env::var("TEST_DATABASE_URL").ok(),
            jwt_secret: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only".to_string()),
        }
    }
}

/// Application router plus handles on its in-memory collaborators
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryArtworkStore,
    pub blobs: MockBlobStore,
    pub email: MockEmailService,
    pub config: TestConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_vars(&[])
    }

    pub fn with_rows(rows: Vec<Artwork>) -> Self {
        Self::build(InMemoryArtworkStore::with_rows(rows), &[])
    }

    /// Extra configuration variables, e.g. `ARTWORK_SLUG_LOOKUP`
    pub fn with_vars(vars: &[(&str, &str)]) -> Self {
        Self::build(InMemoryArtworkStore::new(), vars)
    }

    fn build(store: InMemoryArtworkStore, vars: &[(&str, &str)]) -> Self {
        let test_config = TestConfig::from_env();
        let secret = test_config.jwt_secret.clone();
        let config = Config::from_vars(|key| match key {
            "JWT_SECRET" => Some(secret.clone()),
            "ADMIN_EMAILS" => Some(ADMIN_EMAIL.to_string()),
            other => vars
                .iter()
                .find(|(k, _)| *k == other)
                .map(|(_, v)| v.to_string()),
        })
        .expect("test configuration");

        let blobs = MockBlobStore::new();
        let email = MockEmailService::new();
        let router = build_router(
            &config,
            AppServices {
                artworks: Arc::new(store.clone()),
                blobs: Arc::new(blobs.clone()),
                email: Arc::new(email.clone()),
            },
        );

        Self {
            router,
            store,
            blobs,
            email,
            config: test_config,
        }
    }

    /// Session token for the given e-mail, signed with the test secret
    pub fn token_for(&self, email: &str) -> String {
        let now = Utc::now().timestamp() as u64;
        let claims = SupabaseClaims {
            sub: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
            iat: now,
            exp: now + 3600,
            aud: "authenticated".to_string(),
            role: "authenticated".to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .expect("token encoding")
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_EMAIL)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Public gallery in position order
    pub async fn gallery(&self) -> Vec<Value> {
        let (status, body) = self.get("/api/artworks").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().cloned().unwrap_or_default()
    }

    pub async fn create_artwork(&self, title: &str, availability: &str) -> (StatusCode, Value) {
        let fields = artwork_fields(title, availability);
        let request = multipart_request(
            Method::POST,
            "/api/admin/artworks",
            &self.admin_token(),
            multipart_body(&fields, Some(("painting.jpg", b"jpeg-bytes"))),
        );
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.admin_token()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.admin_token()))
            .body(Body::empty())
            .unwrap();
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub fn artwork_fields<'a>(title: &'a str, availability: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", title),
        ("description", "Oil on linen"),
        ("measurements", "50 x 70 cm"),
        ("techniques", "Oil"),
        ("availability", availability),
    ]
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: Method, uri: &str, token: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Stored artwork fixture
pub struct ArtworkFixture;

impl ArtworkFixture {
    pub fn at(title: &str, availability: Availability, position: i32) -> Artwork {
        let now = Utc::now() + chrono::Duration::milliseconds(position as i64);
        Artwork {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{title} description"),
            measurements: "40 x 40 cm".to_string(),
            techniques: "Acrylic".to_string(),
            availability,
            image_url: format!("mock://blobs/artworks/{}.jpg", generate_slug(title)),
            slug: generate_slug(title),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Available artworks at positions 0..n
    pub fn gallery(titles: &[&str]) -> Vec<Artwork> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Self::at(title, Availability::Available, i as i32))
            .collect()
    }
}

/// Titles in gallery order
pub fn titles(gallery: &[Value]) -> Vec<String> {
    gallery
        .iter()
        .map(|a| a["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Positions in gallery order
pub fn positions(gallery: &[Value]) -> Vec<i64> {
    gallery
        .iter()
        .map(|a| a["position"].as_i64().unwrap_or(-1))
        .collect()
}
