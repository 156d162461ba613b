use serde_json::{json, Value};

use crate::support::TestApp;

#[tokio::test]
async fn home_and_health() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/").await;
    assert_eq!(status, 200);
    assert!(body["message"].is_string());

    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn register_and_login() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;
    app.token_for("ada").await;

    let resp = app
        .client
        .post(app.url("/api/register"))
        .json(&json!({ "username": "ada", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = TestApp::spawn().await;
    app.token_for("ada").await;

    let resp = app
        .client
        .post(app.url("/api/login"))
        .json(&json!({ "username": "ada", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

#[tokio::test]
async fn malformed_registration_is_400() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/register"))
        .json(&json!({ "username": "ada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}
