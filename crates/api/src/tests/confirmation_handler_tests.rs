// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    FailingEmailSender, TestContext, donated_item, pledge, setup, submit_standard_request,
};
use crate::{
    AdminUpdateDonationRequest, ApiError, ConfirmReceiptResponse, admin_update_donation,
    close_request, confirm_receipt, get_request, summary_report,
};

fn confirm(ctx: &mut TestContext, donation_id: i64) -> Result<ConfirmReceiptResponse, ApiError> {
    let school = ctx.school.clone();
    confirm_receipt(&mut ctx.persistence, &ctx.email, donation_id, &school)
}

#[test]
fn test_confirm_reconciles_request_counters() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;

    let response = confirm(&mut ctx, donation_id).unwrap();

    assert_eq!(response.donation.tracking_status, "Received by School");
    assert!(response.donation.school_confirmation);
    assert!(response.donation.school_confirmation_at.is_some());

    let request = response.request.unwrap();
    assert_eq!(request.status, "Partially Fulfilled");
    assert_eq!(request.requested_items[0].quantity_received, 40);
    assert_eq!(request.requested_items[0].remaining, 60);
    assert_eq!(request.requested_items[1].quantity_received, 0);
}

#[test]
fn test_confirming_everything_fulfils_request() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(
        &mut ctx,
        request_id,
        vec![donated_item(1.0, 100.0), donated_item(2.0, 50.0)],
        "Self-Delivery",
    )
    .donation
    .donation_id;

    let response = confirm(&mut ctx, donation_id).unwrap();
    assert_eq!(response.request.unwrap().status, "Fulfilled");

    let school = ctx.school.clone();
    let stored = get_request(&mut ctx.persistence, request_id, &school).unwrap();
    assert_eq!(stored.status, "Fulfilled");
    assert!(stored.requested_items.iter().all(|item| item.remaining == 0));
}

#[test]
fn test_confirm_notifies_donor() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    ctx.email.sent.lock().unwrap().clear();

    confirm(&mut ctx, donation_id).unwrap();
    assert_eq!(ctx.email.recipients(), vec![ctx.donor.email.clone()]);
}

#[test]
fn test_double_confirmation_is_rejected_without_double_counting() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;

    confirm(&mut ctx, donation_id).unwrap();
    assert!(matches!(
        confirm(&mut ctx, donation_id),
        Err(ApiError::InvalidState { .. })
    ));

    let stored = ctx.persistence.get_request(request_id).unwrap().unwrap();
    assert_eq!(stored.items[0].quantity_received, 40);
}

#[test]
fn test_only_receiving_school_may_confirm() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    let (other_school, donor) = (ctx.other_school.clone(), ctx.donor.clone());

    assert!(matches!(
        confirm_receipt(&mut ctx.persistence, &ctx.email, donation_id, &other_school),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        confirm_receipt(&mut ctx.persistence, &ctx.email, donation_id, &donor),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_cancelled_donation_cannot_be_confirmed() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Courier")
        .donation
        .donation_id;
    let admin = ctx.admin.clone();
    admin_update_donation(
        &mut ctx.persistence,
        &ctx.email,
        donation_id,
        &AdminUpdateDonationRequest {
            new_status: String::from("Cancelled"),
            admin_tracking_id: None,
            admin_remarks: None,
        },
        &admin,
    )
    .unwrap();

    assert!(matches!(
        confirm(&mut ctx, donation_id),
        Err(ApiError::InvalidState { .. })
    ));
}

#[test]
fn test_unshipped_courier_confirmation_warns() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Courier")
        .donation
        .donation_id;

    let response = confirm(&mut ctx, donation_id).unwrap();
    assert_eq!(response.warnings.len(), 1);
    assert!(response.warnings[0].contains("Preparing"));
}

#[test]
fn test_failed_email_is_reported_as_warning() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    let school = ctx.school.clone();

    let response =
        confirm_receipt(&mut ctx.persistence, &FailingEmailSender, donation_id, &school).unwrap();
    assert_eq!(response.donation.tracking_status, "Received by School");
    assert_eq!(response.warnings.len(), 1);
    assert!(response.warnings[0].contains("relay unavailable"));
}

#[test]
fn test_confirm_against_closed_request_keeps_it_closed() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    let admin = ctx.admin.clone();
    close_request(&mut ctx.persistence, &ctx.email, request_id, &admin).unwrap();

    let request = confirm(&mut ctx, donation_id).unwrap().request.unwrap();
    assert_eq!(request.status, "Closed");
    assert_eq!(request.requested_items[0].quantity_received, 40);
}

#[test]
fn test_overlapping_pledges_are_capped_on_confirmation() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let first = pledge(&mut ctx, request_id, vec![donated_item(2.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    let second = pledge(&mut ctx, request_id, vec![donated_item(2.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;

    assert!(confirm(&mut ctx, first).unwrap().warnings.is_empty());
    let response = confirm(&mut ctx, second).unwrap();
    assert_eq!(response.warnings.len(), 1);
    assert!(response.warnings[0].contains("capped at 50"));
    let request = response.request.unwrap();

    assert_eq!(request.requested_items[1].quantity_received, 50);
    assert_eq!(request.requested_items[1].remaining, 0);
    assert_eq!(request.status, "Partially Fulfilled");
}

#[test]
fn test_summary_report_reflects_confirmations() {
    let mut ctx = setup();
    let request_id = submit_standard_request(&mut ctx).request.request_id;
    let donation_id = pledge(&mut ctx, request_id, vec![donated_item(1.0, 40.0)], "Self-Delivery")
        .donation
        .donation_id;
    pledge(&mut ctx, request_id, vec![donated_item(2.0, 10.0)], "Self-Delivery");
    confirm(&mut ctx, donation_id).unwrap();

    let admin = ctx.admin.clone();
    let report = summary_report(&mut ctx.persistence, &admin).unwrap();

    let books = report
        .category_totals
        .iter()
        .find(|total| total.category_id == 1)
        .unwrap();
    assert_eq!(books.requested, 100);
    assert_eq!(books.received, 40);

    let received = report
        .donations_by_status
        .iter()
        .find(|count| count.status == "Received by School")
        .unwrap();
    assert_eq!(received.count, 1);
    let preparing = report
        .donations_by_status
        .iter()
        .find(|count| count.status == "Preparing")
        .unwrap();
    assert_eq!(preparing.count, 1);
}
