// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use school_aid_audit::Actor;
use school_aid_domain::{
    DeliveryMethod, DonatedItem, DonatedItemDraft, Donation, DonationDraft, DonationRequest,
    RequestedItem, RequestedItemDraft, TrackingStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const SCHOOL_ID: i64 = 10;
pub const DONOR_ID: i64 = 20;
pub const ADMIN_ID: i64 = 1;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn school_actor() -> Actor {
    Actor::new(SCHOOL_ID, String::from("School"))
}

pub fn donor_actor() -> Actor {
    Actor::new(DONOR_ID, String::from("Donor"))
}

pub fn admin_actor() -> Actor {
    Actor::new(ADMIN_ID, String::from("Admin"))
}

pub fn requested_draft(category_id: f64, quantity: f64) -> RequestedItemDraft {
    RequestedItemDraft {
        category_id: Some(category_id),
        category_name_en: Some(String::from("Exercise books")),
        category_name_si: Some(String::from("අභ්‍යාස පොත්")),
        quantity: Some(quantity),
    }
}

pub fn donation_draft(category_id: f64, quantity: f64) -> DonationDraft {
    DonationDraft {
        items: vec![DonatedItemDraft {
            category_id: Some(category_id),
            category_name_en: None,
            category_name_si: None,
            quantity_donated: Some(quantity),
        }],
        delivery_method: String::from("Self-Delivery"),
        donor_address: None,
        donor_remarks: Some(String::from("Dropping off on Friday")),
    }
}

/// A stored request for 30 exercise books (category 1).
pub fn stored_request() -> DonationRequest {
    let mut request: DonationRequest = DonationRequest::new(
        SCHOOL_ID,
        vec![RequestedItem::new(
            1,
            String::from("Exercise books"),
            String::from("අභ්‍යාස පොත්"),
            30,
        )],
        None,
        test_now(),
    );
    request.request_id = Some(3);
    request
}

/// A stored donation of `quantity` exercise books against `stored_request`.
pub fn stored_donation(
    delivery_method: DeliveryMethod,
    tracking_status: TrackingStatus,
    quantity: u32,
) -> Donation {
    Donation {
        donation_id: Some(8),
        request_id: 3,
        donor_id: DONOR_ID,
        school_id: SCHOOL_ID,
        items: vec![DonatedItem {
            category_id: 1,
            category_name_en: String::from("Exercise books"),
            category_name_si: String::from("අභ්‍යාස පොත්"),
            quantity_donated: quantity,
        }],
        delivery_method,
        donor_address: None,
        donor_remarks: None,
        tracking_status,
        admin_tracking_id: None,
        admin_remarks: None,
        school_confirmation: false,
        school_confirmation_at: None,
        status_last_updated_at: test_now(),
        created_at: test_now(),
    }
}
