// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod donation;
mod error;
mod lifecycle;
mod reconcile;
mod request;
mod status;

#[cfg(test)]
mod tests;

pub use donation::{
    DonatedItem, DonatedItemDraft, Donation, DonationDraft, validate_delivery, validate_donation,
};
pub use error::{DomainError, ItemList, ItemShortfall};
pub use lifecycle::{
    DONOR_PROGRESSION, validate_admin_transition, validate_donor_transition,
    validate_school_confirmation,
};
pub use reconcile::{ReconcileOutcome, derive_request_status, reconcile_confirmed_donation};
pub use request::{
    DEFAULT_MINIMUM_QUANTITY, DonationRequest, MAXIMUM_QUANTITY, RequestPolicy, RequestedItem, RequestedItemDraft,
    validate_requested_items, whole_number,
};
pub use status::{DeliveryMethod, RequestStatus, TrackingStatus};
