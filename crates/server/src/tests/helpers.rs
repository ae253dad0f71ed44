// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use school_aid_api::{LoggingEmailSender, ensure_initial_admin};
use school_aid_domain::RequestPolicy;
use school_aid_persistence::SqlitePersistence;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const PASSWORD: &str = "Corr3ct-Horse";

/// Builds a router over a fresh in-memory database with an `admin` account.
pub fn create_test_app() -> Router {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    ensure_initial_admin(&mut persistence, "admin", PASSWORD, "admin@example.org").unwrap();

    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        email: Arc::new(LoggingEmailSender::new(String::from("test@example.org"))),
        policy: RequestPolicy::default(),
    })
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn login(app: &Router, login_name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"loginName": login_name, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["sessionToken"].as_str().unwrap().to_string()
}

/// Registers an account and returns a session token for it.
pub async fn register_and_login(app: &Router, login_name: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "loginName": login_name,
            "displayName": format!("{login_name} display"),
            "email": format!("{login_name}@example.org"),
            "password": PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    login(app, login_name).await
}

/// Creates a request with one category of the given quantity and returns its id.
pub async fn create_request(app: &Router, school: &str, quantity: u32) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/requests",
        Some(school),
        Some(json!({
            "requestedItems": [{
                "categoryId": 1,
                "categoryNameEnglish": "Books",
                "categoryNameSinhala": "Potha",
                "quantity": quantity,
            }],
            "notes": "Library restock",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create request failed: {body}");
    body["request"]["requestId"].as_i64().unwrap()
}

/// Pledges a self-delivery donation of category 1 and returns the raw response.
pub async fn pledge(app: &Router, donor: &str, request_id: i64, quantity: u32) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/donations",
        Some(donor),
        Some(json!({
            "donationRequestId": request_id,
            "itemsDonated": [{"categoryId": 1, "quantityDonated": quantity}],
            "deliveryMethod": "Self-Delivery",
        })),
    )
    .await
}
