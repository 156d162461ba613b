use std::sync::Arc;

use serde_json::{json, Value};
use storefront::http::AppState;
use storefront::{AuthError, Authenticator, Config, Identity, InMemoryModelStore};

use crate::support::TestApp;

#[tokio::test]
async fn place_order_decrements_stock() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;
    let id = app.create_product(&token, "1500.99", 5).await;

    let resp = app
        .client
        .post(app.url("/api/orders"))
        .bearer_auth(&token)
        .json(&json!({ "productId": id, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["total_price"], "3001.98");
    assert_eq!(body["remaining_stock"], 3);

    let (_, product) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(product["stock"], 3);
}

#[tokio::test]
async fn not_enough_stock() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;
    let id = app.create_product(&token, "10", 1).await;

    let resp = app
        .client
        .post(app.url("/api/orders"))
        .bearer_auth(&token)
        .json(&json!({ "product_id": id, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Not enough stock" }));

    let (_, product) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(product["stock"], 1);
}

#[tokio::test]
async fn rejects_bad_requests() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;
    let id = app.create_product(&token, "10", 1).await;

    let cases: [(Value, u16); 6] = [
        (json!({ "product_id": id, "quantity": 0 }), 400),
        (json!({ "product_id": id, "quantity": -1 }), 400),
        (json!({ "product_id": id, "quantity": 1.5 }), 400),
        (json!({ "product_id": id }), 400),
        (json!({ "quantity": 1 }), 400),
        (json!({ "product_id": "missing", "quantity": 1 }), 404),
    ];
    for (payload, expected) in cases {
        let resp = app
            .client
            .post(app.url("/api/orders"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), expected, "{payload}");
    }

    let (_, product) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(product["stock"], 1);
}

#[tokio::test]
async fn unauthenticated_order_is_401() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/orders"))
        .json(&json!({ "product_id": "p", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn orders_are_listed_per_user() {
    let app = TestApp::spawn().await;
    let ada = app.token_for("ada").await;
    let bob = app.token_for("bob").await;
    let id = app.create_product(&ada, "2", 10).await;

    for (token, quantity) in [(&ada, 1), (&bob, 2), (&ada, 3)] {
        let resp = app
            .client
            .post(app.url("/api/orders"))
            .bearer_auth(token)
            .json(&json!({ "product_id": id, "quantity": quantity }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = app
        .client
        .get(app.url("/api/orders"))
        .bearer_auth(&ada)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let mine: Value = resp.json().await.unwrap();
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    let quantities: u64 = mine.iter().map(|o| o["quantity"].as_u64().unwrap()).sum();
    assert_eq!(quantities, 4);
}

#[tokio::test]
async fn concurrent_orders_for_last_unit() {
    let app = Arc::new(TestApp::spawn().await);
    let token = app.token_for("ada").await;
    let id = app.create_product(&token, "10", 1).await;

    let requests: Vec<_> = (0..2)
        .map(|_| {
            let app = Arc::clone(&app);
            let token = token.clone();
            let id = id.clone();
            tokio::spawn(async move {
                app.client
                    .post(app.url("/api/orders"))
                    .bearer_auth(&token)
                    .json(&json!({ "product_id": id, "quantity": 1 }))
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for request in requests {
        statuses.push(request.await.unwrap());
    }
    statuses.sort_unstable();
    assert_eq!(statuses, vec![201, 400]);

    let (_, product) = app.get_json(&format!("/api/products/{id}")).await;
    assert_eq!(product["stock"], 0);
}

/// Accepts any token and treats it as the user id.
struct TrustingAuthenticator;

impl Authenticator for TrustingAuthenticator {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        Ok(Identity {
            user_id: token.to_string(),
        })
    }
}

#[tokio::test]
async fn authenticator_is_pluggable() {
    let state = AppState::new(InMemoryModelStore::new(), &Config::default())
        .with_authenticator(Arc::new(TrustingAuthenticator));
    let app = TestApp::spawn_with(state).await;
    let id = app.create_product("anyone", "3", 2).await;

    let resp = app
        .client
        .post(app.url("/api/orders"))
        .bearer_auth("user-7")
        .json(&json!({ "product_id": id, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = app
        .client
        .get(app.url("/api/orders"))
        .bearer_auth("user-7")
        .send()
        .await
        .unwrap();
    let mine: Value = resp.json().await.unwrap();
    assert_eq!(mine[0]["user_id"], "user-7");
    assert_eq!(mine[0]["total_price"], "6");
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let app = TestApp::spawn().await;
    let token = app.token_for("ada").await;

    let resp = app
        .client
        .get(app.url("/api/orders"))
        .header("authorization", format!("bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}
