// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies confirmed donations to their parent request.

use crate::donation::DonatedItem;
use crate::request::{DonationRequest, RequestedItem};
use crate::status::RequestStatus;
use time::OffsetDateTime;

/// What reconciling one confirmed donation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Categories whose received counter was updated.
    pub updated_categories: Vec<u32>,
    /// Categories where the donation exceeded what was outstanding and
    /// the counter was capped at the requested quantity.
    pub capped_categories: Vec<u32>,
    /// Donated categories with no matching requested item.
    pub skipped_categories: Vec<u32>,
    /// Request status before reconciliation.
    pub previous_status: RequestStatus,
    /// Request status after reconciliation.
    pub new_status: RequestStatus,
}

impl ReconcileOutcome {
    /// Returns true if any counter changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !self.updated_categories.is_empty()
    }
}

/// Derives a request's status from its item counters.
///
/// - `Fulfilled` when every item has received its full quantity
/// - `Partially Fulfilled` when any item has received something
/// - `Pending` otherwise
#[must_use]
pub fn derive_request_status(items: &[RequestedItem]) -> RequestStatus {
    if !items.is_empty() && items.iter().all(RequestedItem::is_fulfilled) {
        RequestStatus::Fulfilled
    } else if items.iter().any(|item| item.quantity_received > 0) {
        RequestStatus::PartiallyFulfilled
    } else {
        RequestStatus::Pending
    }
}

/// Adds a confirmed donation's items to the request's received counters.
///
/// Each counter is capped at its requested quantity. When at least one
/// counter changed, the status is recomputed unless it was explicitly
/// set to `Closed` or `Cancelled`.
pub fn reconcile_confirmed_donation(
    request: &mut DonationRequest,
    donated: &[DonatedItem],
    now: OffsetDateTime,
) -> ReconcileOutcome {
    let previous_status: RequestStatus = request.status;
    let mut updated_categories: Vec<u32> = Vec::new();
    let mut capped_categories: Vec<u32> = Vec::new();
    let mut skipped_categories: Vec<u32> = Vec::new();

    for item in donated {
        let Some(requested) = request
            .items
            .iter_mut()
            .find(|requested| requested.category_id == item.category_id)
        else {
            skipped_categories.push(item.category_id);
            continue;
        };

        let uncapped: u32 = requested
            .quantity_received
            .saturating_add(item.quantity_donated);
        if uncapped > requested.quantity {
            capped_categories.push(item.category_id);
        }
        requested.quantity_received = uncapped.min(requested.quantity);
        updated_categories.push(item.category_id);
    }

    if !updated_categories.is_empty() {
        if !request.status.is_explicit() {
            request.status = derive_request_status(&request.items);
        }
        request.updated_at = now;
    }

    ReconcileOutcome {
        updated_categories,
        capped_categories,
        skipped_categories,
        previous_status,
        new_status: request.status,
    }
}
