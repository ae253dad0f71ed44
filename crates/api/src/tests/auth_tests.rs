// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TEST_PASSWORD, registration, setup, submit_standard_request};
use crate::{
    ApiError, AuthenticationService, AuthorizationService, LoginRequest, Role,
    ensure_initial_admin, get_request, list_all_requests, list_open_requests, login, logout,
    register_account, summary_report, whoami,
};

#[test]
fn test_register_rejects_admin_role() {
    let mut ctx = setup();
    let result = register_account(&mut ctx.persistence, &registration("sneaky", "Admin"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_register_rejects_duplicate_login() {
    let mut ctx = setup();
    let result = register_account(&mut ctx.persistence, &registration("riverside", "School"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "loginName"
    ));
}

#[test]
fn test_register_rejects_malformed_email() {
    let mut ctx = setup();
    let mut request = registration("lakeside", "School");
    request.email = String::from("lakeside.example.org");
    let result = register_account(&mut ctx.persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));
}

#[test]
fn test_register_enforces_password_policy() {
    let mut ctx = setup();
    let mut request = registration("lakeside", "School");
    request.password = String::from("short");
    let result = register_account(&mut ctx.persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "password"
    ));
}

#[test]
fn test_initial_admin_is_created_once() {
    let mut ctx = setup();
    let again = ensure_initial_admin(
        &mut ctx.persistence,
        "admin",
        TEST_PASSWORD,
        "admin@example.org",
    )
    .unwrap();
    assert_eq!(again, None);
    assert_eq!(ctx.persistence.count_accounts_with_role("Admin").unwrap(), 1);
}

#[test]
fn test_initial_admin_skipped_when_any_admin_exists() {
    let mut ctx = setup();
    let created = ensure_initial_admin(
        &mut ctx.persistence,
        "second-admin",
        TEST_PASSWORD,
        "second@example.org",
    )
    .unwrap();
    assert_eq!(created, None);
    assert!(
        ctx.persistence
            .get_account_by_login("second-admin")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_login_then_validate_session() {
    let mut ctx = setup();
    let response = login(
        &mut ctx.persistence,
        &LoginRequest {
            login_name: String::from("riverside"),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .unwrap();

    assert_eq!(response.account.role, "School");
    assert_eq!(response.session_token.len(), 64);

    let actor =
        AuthenticationService::validate_session(&mut ctx.persistence, &response.session_token)
            .unwrap();
    assert_eq!(actor.account_id, ctx.school.account_id);
    assert_eq!(whoami(&actor).login_name, "RIVERSIDE");
}

#[test]
fn test_login_purges_expired_sessions() {
    let mut ctx = setup();
    let school_id = ctx.school.account_id;
    ctx.persistence
        .create_session(
            "stale-token",
            school_id,
            "2020-01-01T00:00:00Z",
            "2020-01-02T00:00:00Z",
        )
        .unwrap();

    login(
        &mut ctx.persistence,
        &LoginRequest {
            login_name: String::from("riverside"),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .unwrap();

    assert!(
        ctx.persistence
            .get_session_by_token("stale-token")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_login_with_wrong_password_fails() {
    let mut ctx = setup();
    let result = login(
        &mut ctx.persistence,
        &LoginRequest {
            login_name: String::from("riverside"),
            password: String::from("Wr0ng-Password"),
        },
    );
    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_logout_invalidates_session() {
    let mut ctx = setup();
    let response = login(
        &mut ctx.persistence,
        &LoginRequest {
            login_name: String::from("amara"),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .unwrap();

    logout(&mut ctx.persistence, &response.session_token).unwrap();

    let result =
        AuthenticationService::validate_session(&mut ctx.persistence, &response.session_token);
    assert!(result.is_err());
}

#[test]
fn test_unknown_session_token_is_rejected() {
    let mut ctx = setup();
    let result = AuthenticationService::validate_session(&mut ctx.persistence, "not-a-token");
    assert!(result.is_err());
}

#[test]
fn test_role_parsing() {
    assert_eq!("School".parse::<Role>().unwrap(), Role::School);
    assert_eq!("Donor".parse::<Role>().unwrap(), Role::Donor);
    assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
    assert!("Courier".parse::<Role>().is_err());
}

#[test]
fn test_schools_cannot_browse_open_requests() {
    let mut ctx = setup();
    let school = ctx.school.clone();
    let result = list_open_requests(&mut ctx.persistence, &school);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_only_admin_lists_all_requests_and_reports() {
    let mut ctx = setup();
    let donor = ctx.donor.clone();
    let admin = ctx.admin.clone();

    assert!(matches!(
        list_all_requests(&mut ctx.persistence, &donor),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        summary_report(&mut ctx.persistence, &donor),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(list_all_requests(&mut ctx.persistence, &admin).is_ok());
    assert!(summary_report(&mut ctx.persistence, &admin).is_ok());
}

#[test]
fn test_request_visible_to_owner_and_admin_only() {
    let mut ctx = setup();
    let created = submit_standard_request(&mut ctx);
    let request_id = created.request.request_id;
    let (school, other_school, admin, donor) = (
        ctx.school.clone(),
        ctx.other_school.clone(),
        ctx.admin.clone(),
        ctx.donor.clone(),
    );

    let owned = get_request(&mut ctx.persistence, request_id, &school).unwrap();
    assert_eq!(
        owned.school.map(|s| s.display_name),
        Some(String::from("riverside display"))
    );
    assert!(get_request(&mut ctx.persistence, request_id, &admin).is_ok());
    assert!(matches!(
        get_request(&mut ctx.persistence, request_id, &other_school),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        get_request(&mut ctx.persistence, request_id, &donor),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_create_request_requires_school_role() {
    let ctx = setup();
    assert!(AuthorizationService::authorize_create_request(&ctx.school).is_ok());
    assert!(AuthorizationService::authorize_create_request(&ctx.donor).is_err());
    assert!(AuthorizationService::authorize_create_request(&ctx.admin).is_err());
}
