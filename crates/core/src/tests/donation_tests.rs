// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    DONOR_ID, SCHOOL_ID, admin_actor, donation_draft, donor_actor, stored_donation,
    stored_request, test_now,
};
use crate::{CoreError, DonationCommand, Recipient, apply_donation_command, pledge_donation};
use school_aid_domain::{DeliveryMethod, DomainError, RequestStatus, TrackingStatus};
use time::Duration;

#[test]
fn test_pledge_donation_starts_preparing_and_notifies_school() {
    let request = stored_request();
    let result =
        pledge_donation(&request, &donation_draft(1.0, 20.0), donor_actor(), test_now()).unwrap();

    let donation = result.entity;
    assert_eq!(donation.request_id, 3);
    assert_eq!(donation.donor_id, DONOR_ID);
    assert_eq!(donation.school_id, SCHOOL_ID);
    assert_eq!(donation.tracking_status, TrackingStatus::Preparing);
    assert!(!donation.school_confirmation);
    assert_eq!(donation.items[0].category_name_en, "Exercise books");
    assert_eq!(result.notifications.len(), 1);
    assert_eq!(
        result.notifications[0].recipient,
        Recipient::School(SCHOOL_ID)
    );
}

#[test]
fn test_pledge_against_closed_request_fails() {
    let mut request = stored_request();
    request.status = RequestStatus::Closed;

    let result = pledge_donation(&request, &donation_draft(1.0, 5.0), donor_actor(), test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::RequestNotAcceptingDonations { .. }
        ))
    ));
}

#[test]
fn test_donor_walks_self_delivery_progression() {
    let mut donation = stored_donation(DeliveryMethod::SelfDelivery, TrackingStatus::Preparing, 10);
    let later = test_now() + Duration::hours(1);

    for target in ["In Transit", "Delivered"] {
        let result = apply_donation_command(
            &donation,
            DonationCommand::DonorUpdateStatus {
                new_status: String::from(target),
            },
            donor_actor(),
            later,
        )
        .unwrap();
        assert_eq!(result.entity.tracking_status.as_str(), target);
        assert_eq!(result.entity.status_last_updated_at, later);
        assert_eq!(
            result.notifications[0].recipient,
            Recipient::School(SCHOOL_ID)
        );
        donation = result.entity;
    }
}

#[test]
fn test_donor_update_rejects_unknown_status() {
    let donation = stored_donation(DeliveryMethod::SelfDelivery, TrackingStatus::Preparing, 10);
    let result = apply_donation_command(
        &donation,
        DonationCommand::DonorUpdateStatus {
            new_status: String::from("Lost"),
        },
        donor_actor(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTrackingStatus(_)
        ))
    ));
}

#[test]
fn test_donor_update_rejects_skip() {
    let donation = stored_donation(DeliveryMethod::SelfDelivery, TrackingStatus::Preparing, 10);
    let result = apply_donation_command(
        &donation,
        DonationCommand::DonorUpdateStatus {
            new_status: String::from("Delivered"),
        },
        donor_actor(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_admin_update_sets_and_clears_tracking_fields() {
    let donation = stored_donation(DeliveryMethod::Courier, TrackingStatus::Preparing, 10);
    let result = apply_donation_command(
        &donation,
        DonationCommand::AdminUpdate {
            new_status: String::from("In Transit"),
            admin_tracking_id: Some(String::from("LK-12345")),
            admin_remarks: Some(String::from("Picked up")),
        },
        admin_actor(),
        test_now(),
    )
    .unwrap();

    let updated = result.entity;
    assert_eq!(updated.tracking_status, TrackingStatus::InTransit);
    assert_eq!(updated.admin_tracking_id.as_deref(), Some("LK-12345"));
    assert_eq!(result.notifications.len(), 2);
    assert_eq!(
        result.notifications[0].recipient,
        Recipient::Donor(DONOR_ID)
    );

    let result = apply_donation_command(
        &updated,
        DonationCommand::AdminUpdate {
            new_status: String::from("Delivered"),
            admin_tracking_id: Some(String::new()),
            admin_remarks: None,
        },
        admin_actor(),
        test_now(),
    )
    .unwrap();

    assert_eq!(result.entity.admin_tracking_id, None);
    assert_eq!(result.entity.admin_remarks.as_deref(), Some("Picked up"));
}

#[test]
fn test_admin_cannot_move_received_donation() {
    let donation = stored_donation(
        DeliveryMethod::Courier,
        TrackingStatus::ReceivedBySchool,
        10,
    );
    let result = apply_donation_command(
        &donation,
        DonationCommand::AdminUpdate {
            new_status: String::from("In Transit"),
            admin_tracking_id: None,
            admin_remarks: None,
        },
        admin_actor(),
        test_now(),
    );

    match result {
        Err(CoreError::DomainViolation(err)) => assert!(err.is_state_violation()),
        other => panic!("Expected state violation, got {other:?}"),
    }
}
