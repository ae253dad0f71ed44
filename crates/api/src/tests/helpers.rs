// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use school_aid_domain::RequestPolicy;
use school_aid_persistence::Persistence;
use serde_json::Value;

use crate::{
    AuthenticatedActor, CreateDonationRequest, CreateDonationRequestRequest, DonatedItemInput,
    DonationRequestWriteResponse, DonationWriteResponse, EmailError, EmailSender,
    RegisterAccountRequest, RequestedItemInput, create_donation, create_request,
    ensure_initial_admin, register_account,
};

pub const TEST_PASSWORD: &str = "Corr3ct-Horse";

/// Records every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingEmailSender {
    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _)| to.clone())
            .collect()
    }
}

impl EmailSender for RecordingEmailSender {
    fn send(&self, to: &str, subject: &str, _message: &str) -> Result<(), EmailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingEmailSender;

impl EmailSender for FailingEmailSender {
    fn send(&self, _to: &str, _subject: &str, _message: &str) -> Result<(), EmailError> {
        Err(EmailError::Transport(String::from("relay unavailable")))
    }
}

pub struct TestContext {
    pub persistence: Persistence,
    pub school: AuthenticatedActor,
    pub other_school: AuthenticatedActor,
    pub donor: AuthenticatedActor,
    pub other_donor: AuthenticatedActor,
    pub admin: AuthenticatedActor,
    pub email: RecordingEmailSender,
    pub policy: RequestPolicy,
}

pub fn registration(login_name: &str, role: &str) -> RegisterAccountRequest {
    RegisterAccountRequest {
        login_name: login_name.to_string(),
        display_name: format!("{login_name} display"),
        email: format!("{login_name}@example.org"),
        password: TEST_PASSWORD.to_string(),
        role: role.to_string(),
    }
}

fn actor_for(persistence: &mut Persistence, account_id: i64) -> AuthenticatedActor {
    let account = persistence.get_account_by_id(account_id).unwrap().unwrap();
    AuthenticatedActor::from_account(&account).unwrap()
}

fn register(persistence: &mut Persistence, login_name: &str, role: &str) -> AuthenticatedActor {
    let info = register_account(persistence, &registration(login_name, role)).unwrap();
    actor_for(persistence, info.account_id)
}

pub fn setup() -> TestContext {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let school = register(&mut persistence, "riverside", "School");
    let other_school = register(&mut persistence, "hillview", "School");
    let donor = register(&mut persistence, "amara", "Donor");
    let other_donor = register(&mut persistence, "nimal", "Donor");
    let admin_id = ensure_initial_admin(
        &mut persistence,
        "admin",
        TEST_PASSWORD,
        "admin@example.org",
    )
    .unwrap()
    .unwrap();
    let admin = actor_for(&mut persistence, admin_id);

    TestContext {
        persistence,
        school,
        other_school,
        donor,
        other_donor,
        admin,
        email: RecordingEmailSender::default(),
        policy: RequestPolicy::default(),
    }
}

pub fn requested_item(category_id: f64, name: &str, quantity: f64) -> RequestedItemInput {
    RequestedItemInput {
        category_id: Some(category_id),
        category_name_english: Some(name.to_string()),
        category_name_sinhala: Some(format!("{name} (si)")),
        quantity: Some(quantity),
    }
}

pub fn donated_item(category_id: f64, quantity: f64) -> DonatedItemInput {
    DonatedItemInput {
        category_id: Some(category_id),
        category_name_english: None,
        category_name_sinhala: None,
        quantity_donated: Some(quantity),
    }
}

/// Creates a request for Books (category 1, 100) and Pens (category 2, 50).
pub fn submit_standard_request(ctx: &mut TestContext) -> DonationRequestWriteResponse {
    let body = CreateDonationRequestRequest {
        requested_items: vec![
            requested_item(1.0, "Books", 100.0),
            requested_item(2.0, "Pens", 50.0),
        ],
        notes: Some(String::from("For grade 5")),
    };
    create_request(&mut ctx.persistence, &ctx.policy, &body, &ctx.school).unwrap()
}

pub fn pledge(
    ctx: &mut TestContext,
    request_id: i64,
    items: Vec<DonatedItemInput>,
    delivery_method: &str,
) -> DonationWriteResponse {
    let donor = ctx.donor.clone();
    let body = CreateDonationRequest {
        donation_request_id: Value::from(request_id),
        items_donated: items,
        delivery_method: delivery_method.to_string(),
        donor_address: Some(String::from("12 Lake Road, Kandy")),
        donor_remarks: None,
    };
    create_donation(&mut ctx.persistence, &ctx.email, &body, &donor).unwrap()
}
