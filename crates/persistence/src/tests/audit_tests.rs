// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_accounts, later, school, store_donation, store_request, test_now};
use crate::Persistence;
use crate::mutations::audit::persist_audit_event;
use school_aid::confirm_receipt;
use school_aid_audit::{Action, Actor, AuditEvent, EntityKind, EntityRef, StateSnapshot};
use school_aid_domain::{Donation, DonationRequest};

#[test]
fn test_creation_event_refers_to_stored_entity() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let accounts = create_test_accounts(&mut persistence);
    let request: DonationRequest = store_request(&mut persistence, &accounts);
    let request_id: i64 = request.request_id.unwrap();

    let history: Vec<AuditEvent> = persistence
        .list_events_for_entity(EntityRef::request(request_id))
        .unwrap();

    assert_eq!(history.len(), 1);
    let event: &AuditEvent = &history[0];
    assert!(event.event_id.is_some());
    assert_eq!(event.entity.kind, EntityKind::DonationRequest);
    assert_eq!(event.entity.id, request_id);
    assert_eq!(event.action.name, "CreateRequest");
    assert_eq!(event.actor.account_id, accounts.school_id);
    assert_eq!(event.actor.role, "School");
    assert_eq!(event.occurred_at, test_now());
    assert!(event.before.data.is_empty());
    assert!(event.after.data.contains("status=Pending"));
}

#[test]
fn test_donation_history_is_ordered() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let accounts = create_test_accounts(&mut persistence);
    let request: DonationRequest = store_request(&mut persistence, &accounts);
    let donation: Donation = store_donation(&mut persistence, &accounts, &request, &[(1.0, 10.0)]);

    let parent: DonationRequest = persistence
        .get_request(donation.request_id)
        .unwrap()
        .unwrap();
    let confirmation =
        confirm_receipt(&donation, Some(&parent), school(&accounts), later(60)).unwrap();
    persistence.persist_confirmation(&confirmation).unwrap();

    let names: Vec<String> = persistence
        .list_events_for_entity(EntityRef::donation(donation.donation_id.unwrap()))
        .unwrap()
        .into_iter()
        .map(|event| event.action.name)
        .collect();
    assert_eq!(names, vec!["PledgeDonation", "ConfirmReceipt"]);

    // Confirmation is recorded on the donation only.
    let request_history = persistence
        .list_events_for_entity(EntityRef::request(request.request_id.unwrap()))
        .unwrap();
    assert_eq!(request_history.len(), 1);
}

#[test]
fn test_standalone_event_round_trips_details() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let accounts = create_test_accounts(&mut persistence);

    let event: AuditEvent = AuditEvent::new(
        Actor::new(accounts.admin_id, String::from("Admin")),
        Action::new(
            String::from("AdminNote"),
            Some(String::from("Verified with the principal")),
        ),
        EntityRef::donation(77),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        test_now(),
    );
    let event_id: i64 = persist_audit_event(&mut persistence.conn, &event).unwrap();

    let history: Vec<AuditEvent> = persistence
        .list_events_for_entity(EntityRef::donation(77))
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].event_id, Some(event_id));
    assert_eq!(
        history[0].action.details.as_deref(),
        Some("Verified with the principal")
    );
    assert_eq!(history[0].before.data, "before");
    assert_eq!(history[0].after.data, "after");
}

#[test]
fn test_event_for_unknown_actor_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let event: AuditEvent = AuditEvent::new(
        Actor::new(999, String::from("Admin")),
        Action::new(String::from("AdminNote"), None),
        EntityRef::request(1),
        StateSnapshot::empty(),
        StateSnapshot::empty(),
        test_now(),
    );
    assert!(persist_audit_event(&mut persistence.conn, &event).is_err());
}
