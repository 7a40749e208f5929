//! Contact form delivery through the composed application router
//!
//! - POST /api/contact - Forward a visitor message to the studio inbox

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};

use crate::common::{body_json, TestApp};

async fn post_contact(app: &TestApp, payload: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.send(request).await;
    let status = response.status();
    (status, body_json(response).await)
}

fn valid_payload() -> Value {
    json!({
        "name": "  Jana Visitor ",
        "email": "jana@example.org",
        "subject": "Commission",
        "message": "Is the harbour painting still available?"
    })
}

#[test_log::test(tokio::test)]
async fn test_message_is_forwarded_with_reply_to() {
    let app = TestApp::new();

    let (status, body) = post_contact(&app, valid_payload()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Message sent successfully"})
    );

    let sent = app.email.get_emails_from_visitor("jana@example.org");
    assert_eq!(sent.len(), 1);
    let message = &sent[0].message;
    assert_eq!(message.to, "studio@example.com");
    assert!(message.subject.contains("Commission"));
    assert!(message.body_text.contains("Jana Visitor"));
    assert!(message.body_text.contains("harbour painting"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_email_is_rejected_before_sending() {
    let app = TestApp::new();
    let mut payload = valid_payload();
    payload["email"] = json!("not-an-address");

    let (status, body) = post_contact(&app, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please provide a valid email address");
    assert_eq!(app.email.email_count(), 0);
}

#[test_log::test(tokio::test)]
async fn test_blank_message_is_rejected() {
    let app = TestApp::new();
    let mut payload = valid_payload();
    payload["message"] = json!("   ");

    let (status, body) = post_contact(&app, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide a message");
    assert_eq!(app.email.email_count(), 0);
}

#[test_log::test(tokio::test)]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();

    let (status, body) = post_contact(&app, json!({"name": "Jana"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[test_log::test(tokio::test)]
async fn test_provider_outage_returns_generic_failure() {
    let app = TestApp::new();
    app.email.set_failing(true);

    let (status, body) = post_contact(&app, valid_payload()).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to send message. Please try again later."
        })
    );
}
