// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donations pledged by donors against a request.

use crate::error::{DomainError, ItemList, ItemShortfall};
use crate::request::{DonationRequest, MAXIMUM_QUANTITY, RequestedItem, non_blank, whole_number};
use crate::status::{DeliveryMethod, TrackingStatus};
use std::collections::HashSet;
use time::OffsetDateTime;

/// One category of items pledged in a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonatedItem {
    pub category_id: u32,
    pub category_name_en: String,
    pub category_name_si: String,
    /// Always at least 1.
    pub quantity_donated: u32,
}

/// A donor's commitment against a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    /// Storage identifier. `None` until persisted.
    pub donation_id: Option<i64>,
    /// The parent request.
    pub request_id: i64,
    /// Account id of the donor.
    pub donor_id: i64,
    /// Account id of the school that owns the parent request.
    pub school_id: i64,
    /// Pledged items, category ids unique.
    pub items: Vec<DonatedItem>,
    pub delivery_method: DeliveryMethod,
    /// Pickup address, required for courier delivery.
    pub donor_address: Option<String>,
    pub donor_remarks: Option<String>,
    pub tracking_status: TrackingStatus,
    pub admin_tracking_id: Option<String>,
    pub admin_remarks: Option<String>,
    /// Set once, together with `school_confirmation_at`.
    pub school_confirmation: bool,
    pub school_confirmation_at: Option<OffsetDateTime>,
    pub status_last_updated_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl Donation {
    /// Returns true if the school has confirmed receipt.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.school_confirmation
            || matches!(self.tracking_status, TrackingStatus::ReceivedBySchool)
    }

    /// Total number of individual items pledged.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity_donated))
            .sum()
    }

    /// Sets a new tracking status and stamps the change time.
    pub const fn set_status(&mut self, status: TrackingStatus, now: OffsetDateTime) {
        self.tracking_status = status;
        self.status_last_updated_at = now;
    }
}

/// A donated item as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonatedItemDraft {
    pub category_id: Option<f64>,
    /// Defaults to the request's name for the category when absent.
    pub category_name_en: Option<String>,
    /// Defaults to the request's name for the category when absent.
    pub category_name_si: Option<String>,
    pub quantity_donated: Option<f64>,
}

/// A donation as submitted by a donor, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationDraft {
    pub items: Vec<DonatedItemDraft>,
    pub delivery_method: String,
    pub donor_address: Option<String>,
    pub donor_remarks: Option<String>,
}

/// Item shape after the list-level checks, before matching against the request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PledgedItem {
    category_id: u32,
    quantity_donated: u32,
    category_name_en: Option<String>,
    category_name_si: Option<String>,
}

/// Validates a donor's submitted item list without looking at the request.
fn validate_pledged_items(drafts: &[DonatedItemDraft]) -> Result<Vec<PledgedItem>, DomainError> {
    let list: ItemList = ItemList::Donated;
    if drafts.is_empty() {
        return Err(DomainError::EmptyItemList(list));
    }

    let mut seen: HashSet<u32> = HashSet::new();
    let mut pledged: Vec<PledgedItem> = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.iter().enumerate() {
        let raw_category: f64 = draft.category_id.ok_or(DomainError::MissingItemField {
            list,
            index,
            field: "categoryId",
        })?;
        let raw_quantity: f64 = draft
            .quantity_donated
            .ok_or(DomainError::MissingItemField {
                list,
                index,
                field: "quantityDonated",
            })?;

        let category_id: u32 = whole_number(raw_category).ok_or(DomainError::NotWholeNumber {
            list,
            index,
            field: "categoryId",
        })?;
        let quantity_donated: u32 =
            whole_number(raw_quantity).ok_or(DomainError::NotWholeNumber {
                list,
                index,
                field: "quantityDonated",
            })?;

        if quantity_donated == 0 {
            return Err(DomainError::QuantityNotPositive { category_id });
        }
        if quantity_donated > MAXIMUM_QUANTITY {
            return Err(DomainError::QuantityAboveMaximum {
                list,
                category_id,
                quantity: quantity_donated,
                maximum: MAXIMUM_QUANTITY,
            });
        }
        if !seen.insert(category_id) {
            return Err(DomainError::DuplicateCategory { list, category_id });
        }

        pledged.push(PledgedItem {
            category_id,
            quantity_donated,
            category_name_en: non_blank(draft.category_name_en.as_ref()),
            category_name_si: non_blank(draft.category_name_si.as_ref()),
        });
    }

    Ok(pledged)
}

/// Validates the delivery method and the address it may require.
///
/// # Errors
///
/// Returns an error if the method is unknown, or if it is `Courier`
/// and no non-blank address was supplied.
pub fn validate_delivery(
    method: &str,
    donor_address: Option<&String>,
) -> Result<DeliveryMethod, DomainError> {
    let delivery_method: DeliveryMethod = method.parse()?;
    if delivery_method.requires_address() && non_blank(donor_address).is_none() {
        return Err(DomainError::MissingDonorAddress);
    }
    Ok(delivery_method)
}

/// Checks every pledged item against the request's remaining quantities.
///
/// Remaining is computed from the stored counters only; in-flight
/// unconfirmed donations are not subtracted. All violations are
/// collected so the donor sees the complete list.
fn check_remaining(
    request: &DonationRequest,
    pledged: Vec<PledgedItem>,
) -> Result<Vec<DonatedItem>, DomainError> {
    let mut shortfalls: Vec<ItemShortfall> = Vec::new();
    let mut accepted: Vec<DonatedItem> = Vec::with_capacity(pledged.len());

    for item in pledged {
        let Some(requested): Option<&RequestedItem> = request.item(item.category_id) else {
            shortfalls.push(ItemShortfall::UnknownCategory {
                category_id: item.category_id,
            });
            continue;
        };

        let remaining: u32 = requested.remaining();
        if item.quantity_donated > remaining {
            shortfalls.push(ItemShortfall::OverRemaining {
                category_id: item.category_id,
                category_name: requested.category_name_en.clone(),
                offered: item.quantity_donated,
                remaining,
            });
            continue;
        }

        accepted.push(DonatedItem {
            category_id: item.category_id,
            category_name_en: item
                .category_name_en
                .unwrap_or_else(|| requested.category_name_en.clone()),
            category_name_si: item
                .category_name_si
                .unwrap_or_else(|| requested.category_name_si.clone()),
            quantity_donated: item.quantity_donated,
        });
    }

    if shortfalls.is_empty() {
        Ok(accepted)
    } else {
        Err(DomainError::ExceedsRemaining { shortfalls })
    }
}

/// Validates a donation against its parent request.
///
/// Checks run in a fixed order and the first failing stage is reported:
/// 1. the item list (non-empty, whole quantities of at least 1, unique categories)
/// 2. the delivery method and courier address
/// 3. the request still accepts donations
/// 4. every item exists in the request and fits the remaining quantity
///
/// # Errors
///
/// Returns the first violated rule. Stage 4 reports every offending item.
pub fn validate_donation(
    request: &DonationRequest,
    draft: &DonationDraft,
) -> Result<(Vec<DonatedItem>, DeliveryMethod), DomainError> {
    let pledged: Vec<PledgedItem> = validate_pledged_items(&draft.items)?;
    let delivery_method: DeliveryMethod =
        validate_delivery(&draft.delivery_method, draft.donor_address.as_ref())?;

    if !request.accepts_donations() {
        return Err(DomainError::RequestNotAcceptingDonations {
            status: request.status,
        });
    }

    let items: Vec<DonatedItem> = check_remaining(request, pledged)?;
    Ok((items, delivery_method))
}
