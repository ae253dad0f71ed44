// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DeliveryMethod, DonatedItem, DonatedItemDraft, Donation, DonationDraft, DonationRequest,
    RequestedItem, RequestedItemDraft, TrackingStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn requested_draft(category_id: f64, quantity: f64) -> RequestedItemDraft {
    RequestedItemDraft {
        category_id: Some(category_id),
        category_name_en: Some(format!("Category {category_id}")),
        category_name_si: Some(format!("කාණ්ඩය {category_id}")),
        quantity: Some(quantity),
    }
}

pub fn donated_draft(category_id: f64, quantity: f64) -> DonatedItemDraft {
    DonatedItemDraft {
        category_id: Some(category_id),
        category_name_en: None,
        category_name_si: None,
        quantity_donated: Some(quantity),
    }
}

pub fn self_delivery_draft(items: Vec<DonatedItemDraft>) -> DonationDraft {
    DonationDraft {
        items,
        delivery_method: String::from("Self-Delivery"),
        donor_address: None,
        donor_remarks: None,
    }
}

/// A persisted request with two categories: 1 -> 100 books, 2 -> 50 pens.
pub fn create_test_request() -> DonationRequest {
    let mut request: DonationRequest = DonationRequest::new(
        10,
        vec![
            RequestedItem::new(1, String::from("Books"), String::from("පොත්"), 100),
            RequestedItem::new(2, String::from("Pens"), String::from("පෑන්"), 50),
        ],
        None,
        test_now(),
    );
    request.request_id = Some(1);
    request
}

pub fn create_test_donation(
    delivery_method: DeliveryMethod,
    tracking_status: TrackingStatus,
) -> Donation {
    Donation {
        donation_id: Some(7),
        request_id: 1,
        donor_id: 20,
        school_id: 10,
        items: vec![DonatedItem {
            category_id: 1,
            category_name_en: String::from("Books"),
            category_name_si: String::from("පොත්"),
            quantity_donated: 30,
        }],
        delivery_method,
        donor_address: match delivery_method {
            DeliveryMethod::Courier => Some(String::from("12 Galle Road")),
            DeliveryMethod::SelfDelivery => None,
        },
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
