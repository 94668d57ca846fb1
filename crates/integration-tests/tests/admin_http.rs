//! HTTP tests against a running admin server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p kinmel-admin)
//! - A staff account matching `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`
//!   (create one with `km-cli admin create`)
//!
//! Run with: cargo test -p kinmel-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use kinmel_integration_tests::{admin_base_url, session_client};

async fn login() -> Client {
    let client = session_client();
    let email =
        std::env::var("ADMIN_TEST_EMAIL").unwrap_or_else(|_| "staff@example.com".to_string());
    let password =
        std::env::var("ADMIN_TEST_PASSWORD").unwrap_or_else(|_| "integration-password".to_string());

    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK, "login failed");

    client
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_unauthenticated_api_is_401() {
    let client = session_client();
    let resp = client
        .get(format!("{}/api/orders", admin_base_url()))
        .send()
        .await
        .expect("Failed to reach admin");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.get("error").is_some());
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_login_then_me() {
    let client = login().await;
    let resp = client
        .get(format!("{}/auth/me", admin_base_url()))
        .send()
        .await
        .expect("Failed to get current admin");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.get("email").is_some());
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_wrong_password_is_401() {
    let client = session_client();
    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "email": "staff@example.com", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to reach admin");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and staff account"]
async fn test_dashboard_shape() {
    let client = login().await;
    let resp = client
        .get(format!("{}/api/dashboard", admin_base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.get("status_counts").is_some());
    assert!(body.get("completed_revenue").is_some());
}

#[tokio::test]
#[ignore = "Requires running admin server, staff account and a pending order"]
async fn test_illegal_status_transition_is_409() {
    let client = login().await;
    let base_url = admin_base_url();

    // Find a pending order
    let resp = client
        .get(format!("{base_url}/api/orders?status=pending&per_page=1"))
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    let Some(order) = body["orders"].as_array().and_then(|a| a.first()) else {
        panic!("no pending order to test against");
    };
    let id = order["id"].as_i64().expect("order id");

    // pending -> completed skips processing and must be refused
    let resp = client
        .post(format!("{base_url}/api/orders/{id}/status"))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .expect("Failed to post status");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
