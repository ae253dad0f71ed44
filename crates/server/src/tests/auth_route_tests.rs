// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::json;

use super::helpers::{create_test_app, login, register_and_login, send};

#[tokio::test]
async fn test_health() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_whoami() {
    let app = create_test_app();
    let token = register_and_login(&app, "riverside", "School").await;

    let (status, body) = send(&app, "GET", "/auth/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loginName"], "RIVERSIDE");
    assert_eq!(body["role"], "School");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized_with_error_body() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/requests/mine", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "Missing Authorization header");
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/auth/whoami", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = create_test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"loginName": "admin", "password": "Wr0ng-Password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = create_test_app();
    let token = login(&app, "admin").await;

    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/auth/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_self_registration_as_admin_is_rejected() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "loginName": "sneaky",
            "displayName": "Sneaky",
            "email": "sneaky@example.org",
            "password": "Corr3ct-Horse",
            "role": "Admin",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"loginName": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_role_gates_return_forbidden() {
    let app = create_test_app();
    let school = register_and_login(&app, "riverside", "School").await;
    let donor = register_and_login(&app, "amara", "Donor").await;

    let (status, _) = send(&app, "GET", "/requests/open", Some(&school), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/reports/summary", Some(&donor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/requests", Some(&donor), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
