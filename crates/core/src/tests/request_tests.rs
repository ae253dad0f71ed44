// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    SCHOOL_ID, admin_actor, requested_draft, school_actor, stored_request, test_now,
};
use crate::{CoreError, Recipient, RequestCommand, apply_request_command, submit_request};
use school_aid_audit::EntityKind;
use school_aid_domain::{DomainError, RequestPolicy, RequestStatus};

#[test]
fn test_submit_request_creates_pending_request_owned_by_actor() {
    let result = submit_request(
        &[requested_draft(1.0, 30.0), requested_draft(2.0, 40.0)],
        Some(String::from("  For grade 5  ")),
        &RequestPolicy::default(),
        school_actor(),
        test_now(),
    )
    .unwrap();

    let request = result.entity;
    assert_eq!(request.school_id, SCHOOL_ID);
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.notes.as_deref(), Some("For grade 5"));
    assert!(request.items.iter().all(|item| item.quantity_received == 0));
    assert_eq!(result.audit_event.action.name, "CreateRequest");
    assert_eq!(result.audit_event.entity.kind, EntityKind::DonationRequest);
    assert!(result.audit_event.before.data.is_empty());
}

#[test]
fn test_submit_request_propagates_validation_error() {
    let result = submit_request(
        &[requested_draft(1.0, 10.0)],
        None,
        &RequestPolicy::default(),
        school_actor(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::QuantityBelowMinimum { .. }
        ))
    ));
}

#[test]
fn test_cancel_request_sets_cancelled() {
    let request = stored_request();
    let result =
        apply_request_command(&request, RequestCommand::Cancel, school_actor(), test_now())
            .unwrap();

    assert_eq!(result.entity.status, RequestStatus::Cancelled);
    assert_eq!(result.audit_event.action.name, "CancelRequest");
    assert!(result.notifications.is_empty());
}

#[test]
fn test_cancel_fulfilled_request_fails() {
    let mut request = stored_request();
    request.status = RequestStatus::Fulfilled;

    let result =
        apply_request_command(&request, RequestCommand::Cancel, school_actor(), test_now());
    match result {
        Err(CoreError::DomainViolation(err)) => assert!(err.is_state_violation()),
        other => panic!("Expected state violation, got {other:?}"),
    }
}

#[test]
fn test_close_request_notifies_school() {
    let request = stored_request();
    let result =
        apply_request_command(&request, RequestCommand::Close, admin_actor(), test_now()).unwrap();

    assert_eq!(result.entity.status, RequestStatus::Closed);
    assert_eq!(result.notifications.len(), 1);
    assert_eq!(
        result.notifications[0].recipient,
        Recipient::School(SCHOOL_ID)
    );
}

#[test]
fn test_request_command_requires_persisted_request() {
    let mut request = stored_request();
    request.request_id = None;

    let result = apply_request_command(&request, RequestCommand::Close, admin_actor(), test_now());
    assert!(matches!(result, Err(CoreError::NotPersisted(_))));
}
