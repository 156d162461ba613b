use serde_json::{json, Value};

use crate::support::TestApp;

#[tokio::test]
async fn create_list_show_delete() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;

    let id = app.create_product(&token, "1500.99", 5).await;

    let (status, list) = app.get_json("/api/products").await;
    assert_eq!(status, 200);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["price"], "1500.99");
    assert_eq!(list[0]["stock"], 5);

    let (status, product) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(product["name"], "Laptop");

    let resp = app
        .client
        .delete(app.url(&format!("/api/products/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (status, _) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn creating_requires_a_token() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/products"))
        .json(&json!({ "name": "x", "price": "1", "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = app
        .client
        .post(app.url("/api/products"))
        .bearer_auth("forged")
        .json(&json!({ "name": "x", "price": "1", "stock": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let (_, list) = app.get_json("/api/products").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn negative_stock_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;

    let resp = app
        .client
        .post(app.url("/api/products"))
        .bearer_auth(&token)
        .json(&json!({ "name": "x", "price": "1", "stock": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_product_is_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get_json("/api/products/does-not-exist").await;
    assert_eq!(status, 404);
    assert!(body["message"].is_string());
}
