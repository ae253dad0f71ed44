// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation requests submitted by schools.

use crate::error::{DomainError, ItemList};
use crate::status::RequestStatus;
use num_traits::ToPrimitive;
use std::collections::HashSet;
use time::OffsetDateTime;

/// Default minimum quantity a school may request per category.
pub const DEFAULT_MINIMUM_QUANTITY: u32 = 25;

/// Largest quantity accepted for any requested or donated item.
///
/// Matches the range of the `INTEGER` quantity columns.
pub const MAXIMUM_QUANTITY: u32 = 2_147_483_647;

/// Tunable rules applied when a school submits a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    /// Smallest quantity accepted for any requested category.
    pub minimum_quantity: u32,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            minimum_quantity: DEFAULT_MINIMUM_QUANTITY,
        }
    }
}

/// One category of items requested by a school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedItem {
    /// Category identifier, unique within the request.
    pub category_id: u32,
    /// English display name.
    pub category_name_en: String,
    /// Sinhala display name.
    pub category_name_si: String,
    /// The amount requested.
    pub quantity: u32,
    /// The amount confirmed as received so far. Never exceeds `quantity`.
    pub quantity_received: u32,
}

impl RequestedItem {
    /// Creates a requested item with nothing received yet.
    #[must_use]
    pub const fn new(
        category_id: u32,
        category_name_en: String,
        category_name_si: String,
        quantity: u32,
    ) -> Self {
        Self {
            category_id,
            category_name_en,
            category_name_si,
            quantity,
            quantity_received: 0,
        }
    }

    /// The amount still outstanding.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.quantity.saturating_sub(self.quantity_received)
    }

    /// Returns true once the full quantity has been received.
    #[must_use]
    pub const fn is_fulfilled(&self) -> bool {
        self.quantity_received >= self.quantity
    }
}

/// A school's list of needed items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    /// Storage identifier. `None` until persisted.
    pub request_id: Option<i64>,
    /// Account id of the owning school.
    pub school_id: i64,
    /// Requested categories, in submission order.
    pub items: Vec<RequestedItem>,
    /// Aggregate status.
    pub status: RequestStatus,
    /// Optional free text from the school.
    pub notes: Option<String>,
    /// When the request was submitted.
    pub created_at: OffsetDateTime,
    /// When the request was last modified.
    pub updated_at: OffsetDateTime,
}

impl DonationRequest {
    /// Creates a new pending request from validated items.
    #[must_use]
    pub const fn new(
        school_id: i64,
        items: Vec<RequestedItem>,
        notes: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            request_id: None,
            school_id,
            items,
            status: RequestStatus::Pending,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Finds a requested item by category.
    #[must_use]
    pub fn item(&self, category_id: u32) -> Option<&RequestedItem> {
        self.items.iter().find(|item| item.category_id == category_id)
    }

    /// Returns true if new donations may be pledged against this request.
    #[must_use]
    pub const fn accepts_donations(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Validates that the owning school may cancel this request.
    ///
    /// # Errors
    ///
    /// Returns an error unless the request is `Pending` or `Partially Fulfilled`.
    pub const fn validate_cancel(&self) -> Result<(), DomainError> {
        match self.status {
            RequestStatus::Pending | RequestStatus::PartiallyFulfilled => Ok(()),
            from => Err(DomainError::InvalidRequestTransition {
                from,
                to: RequestStatus::Cancelled,
            }),
        }
    }

    /// Validates that an administrator may close this request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is already `Closed` or `Cancelled`.
    pub const fn validate_close(&self) -> Result<(), DomainError> {
        if self.status.is_explicit() {
            return Err(DomainError::InvalidRequestTransition {
                from: self.status,
                to: RequestStatus::Closed,
            });
        }
        Ok(())
    }
}

/// An item as submitted by a school, before validation.
///
/// Every field is optional so that missing fields can be reported
/// precisely. Numbers arrive as JSON numbers and must be whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestedItemDraft {
    pub category_id: Option<f64>,
    pub category_name_en: Option<String>,
    pub category_name_si: Option<String>,
    pub quantity: Option<f64>,
}

/// Converts a submitted number into a non-negative whole `u32`.
///
/// Returns `None` for fractions, negatives, NaN and out-of-range values.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn whole_number(value: f64) -> Option<u32> {
    if value.fract() != 0.0 {
        return None;
    }
    value.to_u32()
}

/// Returns the trimmed value if the field is present and non-blank.
pub(crate) fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates a school's submitted item list.
///
/// The whole submission fails on the first violated rule; nothing is
/// partially accepted.
///
/// # Errors
///
/// Returns an error if:
/// - The list is empty
/// - Any item is missing a field or has a blank name
/// - Any number is not a whole number
/// - Any quantity is below `policy.minimum_quantity`
/// - Any category id is repeated
pub fn validate_requested_items(
    drafts: &[RequestedItemDraft],
    policy: &RequestPolicy,
) -> Result<Vec<RequestedItem>, DomainError> {
    if drafts.is_empty() {
        return Err(DomainError::EmptyItemList(ItemList::Requested));
    }

    let list: ItemList = ItemList::Requested;
    let mut seen: HashSet<u32> = HashSet::new();
    let mut items: Vec<RequestedItem> = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.iter().enumerate() {
        let missing = |field: &'static str| DomainError::MissingItemField { list, index, field };

        let raw_category: f64 = draft.category_id.ok_or_else(|| missing("categoryId"))?;
        let name_en: String = non_blank(draft.category_name_en.as_ref())
            .ok_or_else(|| missing("categoryNameEnglish"))?;
        let name_si: String = non_blank(draft.category_name_si.as_ref())
            .ok_or_else(|| missing("categoryNameSinhala"))?;
        let raw_quantity: f64 = draft.quantity.ok_or_else(|| missing("quantity"))?;

        let category_id: u32 =
            whole_number(raw_category).ok_or(DomainError::NotWholeNumber {
                list,
                index,
                field: "categoryId",
            })?;
        let quantity: u32 = whole_number(raw_quantity).ok_or(DomainError::NotWholeNumber {
            list,
            index,
            field: "quantity",
        })?;

        if quantity < policy.minimum_quantity {
            return Err(DomainError::QuantityBelowMinimum {
                category_id,
                quantity,
                minimum: policy.minimum_quantity,
            });
        }
        if quantity > MAXIMUM_QUANTITY {
            return Err(DomainError::QuantityAboveMaximum {
                list,
                category_id,
                quantity,
                maximum: MAXIMUM_QUANTITY,
            });
        }

        if !seen.insert(category_id) {
            return Err(DomainError::DuplicateCategory { list, category_id });
        }

        items.push(RequestedItem::new(category_id, name_en, name_si, quantity));
    }

    Ok(items)
}
