// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_request, donated_draft, self_delivery_draft};
use crate::{
    DeliveryMethod, DomainError, DonationDraft, ItemList, ItemShortfall, MAXIMUM_QUANTITY,
    RequestStatus, validate_donation,
};

#[test]
fn test_validate_donation_accepts_within_remaining() {
    let request = create_test_request();
    let draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 100.0)]);

    let (items, method) = validate_donation(&request, &draft).unwrap();

    assert_eq!(method, DeliveryMethod::SelfDelivery);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity_donated, 100);
    assert_eq!(items[0].category_name_en, "Books");
    assert_eq!(items[0].category_name_si, "පොත්");
}

#[test]
fn test_validate_donation_keeps_supplied_names() {
    let request = create_test_request();
    let mut item = donated_draft(2.0, 5.0);
    item.category_name_en = Some(String::from("Blue pens"));
    let draft: DonationDraft = self_delivery_draft(vec![item]);

    let (items, _) = validate_donation(&request, &draft).unwrap();
    assert_eq!(items[0].category_name_en, "Blue pens");
    assert_eq!(items[0].category_name_si, "පෑන්");
}

#[test]
fn test_validate_donation_rejects_empty_items() {
    let request = create_test_request();
    let draft: DonationDraft = self_delivery_draft(Vec::new());

    let result = validate_donation(&request, &draft);
    assert_eq!(result, Err(DomainError::EmptyItemList(ItemList::Donated)));
}

#[test]
fn test_validate_donation_rejects_zero_quantity() {
    let request = create_test_request();
    let draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 0.0)]);

    let result = validate_donation(&request, &draft);
    assert_eq!(
        result,
        Err(DomainError::QuantityNotPositive { category_id: 1 })
    );
}

#[test]
fn test_validate_donation_rejects_quantity_above_maximum() {
    let request = create_test_request();
    let draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 3_000_000_000.0)]);

    let result = validate_donation(&request, &draft);
    assert_eq!(
        result,
        Err(DomainError::QuantityAboveMaximum {
            list: ItemList::Donated,
            category_id: 1,
            quantity: 3_000_000_000,
            maximum: MAXIMUM_QUANTITY,
        })
    );
}

#[test]
fn test_validate_donation_rejects_duplicate_category() {
    let request = create_test_request();
    let draft: DonationDraft =
        self_delivery_draft(vec![donated_draft(1.0, 1.0), donated_draft(1.0, 2.0)]);

    let result = validate_donation(&request, &draft);
    assert!(matches!(
        result,
        Err(DomainError::DuplicateCategory {
            list: ItemList::Donated,
            category_id: 1
        })
    ));
}

#[test]
fn test_validate_donation_rejects_unknown_delivery_method() {
    let request = create_test_request();
    let mut draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 1.0)]);
    draft.delivery_method = String::from("self-delivery");

    let result = validate_donation(&request, &draft);
    assert!(matches!(result, Err(DomainError::InvalidDeliveryMethod(_))));
}

#[test]
fn test_validate_donation_requires_address_for_courier() {
    let request = create_test_request();
    let mut draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 1.0)]);
    draft.delivery_method = String::from("Courier");
    draft.donor_address = Some(String::from("  "));

    let result = validate_donation(&request, &draft);
    assert_eq!(result, Err(DomainError::MissingDonorAddress));

    draft.donor_address = Some(String::from("12 Galle Road, Colombo"));
    assert!(validate_donation(&request, &draft).is_ok());
}

#[test]
fn test_validate_donation_rejects_terminal_request() {
    for status in [
        RequestStatus::Fulfilled,
        RequestStatus::Closed,
        RequestStatus::Cancelled,
    ] {
        let mut request = create_test_request();
        request.status = status;
        let draft: DonationDraft = self_delivery_draft(vec![donated_draft(1.0, 1.0)]);

        let result = validate_donation(&request, &draft);
        assert_eq!(
            result,
            Err(DomainError::RequestNotAcceptingDonations { status })
        );
    }
}

#[test]
fn test_validate_donation_item_errors_reported_before_request_state() {
    let mut request = create_test_request();
    request.status = RequestStatus::Closed;
    let draft: DonationDraft = self_delivery_draft(Vec::new());

    let result = validate_donation(&request, &draft);
    assert_eq!(result, Err(DomainError::EmptyItemList(ItemList::Donated)));
}

#[test]
fn test_validate_donation_lists_every_shortfall() {
    let mut request = create_test_request();
    request.items[0].quantity_received = 90;
    let draft: DonationDraft = self_delivery_draft(vec![
        donated_draft(1.0, 20.0),
        donated_draft(2.0, 10.0),
        donated_draft(9.0, 1.0),
    ]);

    let Err(DomainError::ExceedsRemaining { shortfalls }) = validate_donation(&request, &draft)
    else {
        panic!("Expected ExceedsRemaining");
    };

    assert_eq!(
        shortfalls,
        vec![
            ItemShortfall::OverRemaining {
                category_id: 1,
                category_name: String::from("Books"),
                offered: 20,
                remaining: 10,
            },
            ItemShortfall::UnknownCategory { category_id: 9 },
        ]
    );
}

#[test]
fn test_exceeds_remaining_message_names_category_and_remaining() {
    let mut request = create_test_request();
    request.items[1].quantity_received = 45;
    let draft: DonationDraft = self_delivery_draft(vec![donated_draft(2.0, 6.0)]);

    let err = validate_donation(&request, &draft).unwrap_err();
    let message: String = err.to_string();
    assert!(message.contains("Pens"));
    assert!(message.contains("Only 5 remaining"));
}
