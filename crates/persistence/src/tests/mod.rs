// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;

use crate::{PersistCreateResult, Persistence};
use school_aid::{TransitionResult, pledge_donation, submit_request};
use school_aid_audit::Actor;
use school_aid_domain::{
    DonatedItemDraft, Donation, DonationDraft, DonationRequest, RequestPolicy, RequestedItemDraft,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// Account IDs created by `create_test_accounts`.
pub struct TestAccounts {
    pub school_id: i64,
    pub donor_id: i64,
    pub admin_id: i64,
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn later(minutes: i64) -> OffsetDateTime {
    test_now() + time::Duration::minutes(minutes)
}

pub fn create_test_accounts(persistence: &mut Persistence) -> TestAccounts {
    TestAccounts {
        school_id: persistence
            .create_account("central-college", "Central College", "office@central.lk", "school-pass-1", "School")
            .unwrap(),
        donor_id: persistence
            .create_account("donor1", "Nimal Perera", "nimal@example.com", "donor-pass-1", "Donor")
            .unwrap(),
        admin_id: persistence
            .create_account("admin", "Administrator", "admin@schoolaid.lk", "admin-pass-1", "Admin")
            .unwrap(),
    }
}

pub fn school(accounts: &TestAccounts) -> Actor {
    Actor::new(accounts.school_id, String::from("School"))
}

pub fn donor(accounts: &TestAccounts) -> Actor {
    Actor::new(accounts.donor_id, String::from("Donor"))
}

pub fn admin(accounts: &TestAccounts) -> Actor {
    Actor::new(accounts.admin_id, String::from("Admin"))
}

pub fn item_draft(category_id: f64, name: &str, quantity: f64) -> RequestedItemDraft {
    RequestedItemDraft {
        category_id: Some(category_id),
        category_name_en: Some(name.to_string()),
        category_name_si: Some(format!("{name} (si)")),
        quantity: Some(quantity),
    }
}

/// Stores a request for 100 books (category 1) and 50 pens (category 2).
pub fn store_request(persistence: &mut Persistence, accounts: &TestAccounts) -> DonationRequest {
    let result: TransitionResult<DonationRequest> = submit_request(
        &[item_draft(1.0, "Books", 100.0), item_draft(2.0, "Pens", 50.0)],
        Some(String::from("For grade 5")),
        &RequestPolicy::default(),
        school(accounts),
        test_now(),
    )
    .unwrap();
    let stored: PersistCreateResult = persistence.persist_new_request(&result).unwrap();
    persistence.get_request(stored.entity_id).unwrap().unwrap()
}

pub fn self_delivery(items: &[(f64, f64)]) -> DonationDraft {
    DonationDraft {
        items: items
            .iter()
            .map(|(category_id, quantity)| DonatedItemDraft {
                category_id: Some(*category_id),
                category_name_en: None,
                category_name_si: None,
                quantity_donated: Some(*quantity),
            })
            .collect(),
        delivery_method: String::from("Self-Delivery"),
        donor_address: None,
        donor_remarks: None,
    }
}

/// Pledges and stores a self-delivery donation against `request`.
pub fn store_donation(
    persistence: &mut Persistence,
    accounts: &TestAccounts,
    request: &DonationRequest,
    items: &[(f64, f64)],
) -> Donation {
    let result: TransitionResult<Donation> =
        pledge_donation(request, &self_delivery(items), donor(accounts), later(5)).unwrap();
    let stored: PersistCreateResult = persistence.persist_new_donation(&result).unwrap();
    persistence.get_donation(stored.entity_id).unwrap().unwrap()
}
