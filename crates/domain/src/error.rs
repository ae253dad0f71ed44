// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::{RequestStatus, TrackingStatus};
use std::fmt;

/// Which submitted item list a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemList {
    /// The `requestedItems` list of a donation request.
    Requested,
    /// The `itemsDonated` list of a donation.
    Donated,
}

impl ItemList {
    /// Returns the wire name of the list.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Requested => "requestedItems",
            Self::Donated => "itemsDonated",
        }
    }
}

/// A single donated item that cannot be accepted against its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemShortfall {
    /// The category does not exist in the request.
    UnknownCategory {
        /// The category id that was offered.
        category_id: u32,
    },
    /// The offered quantity exceeds what is still outstanding.
    OverRemaining {
        /// The category id that was offered.
        category_id: u32,
        /// English display name of the category.
        category_name: String,
        /// The quantity offered by the donor.
        offered: u32,
        /// The quantity still outstanding on the request.
        remaining: u32,
    },
}

impl fmt::Display for ItemShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { category_id } => {
                write!(f, "Category {category_id} is not part of this request")
            }
            Self::OverRemaining {
                category_id,
                category_name,
                offered,
                remaining,
            } => write!(
                f,
                "{category_name} (category {category_id}): offered {offered}. Only {remaining} remaining"
            ),
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An item list was empty.
    EmptyItemList(ItemList),
    /// An item is missing a required field.
    MissingItemField {
        /// The list the item belongs to.
        list: ItemList,
        /// Zero-based position of the item in the list.
        index: usize,
        /// The wire name of the missing field.
        field: &'static str,
    },
    /// A numeric item field is not a non-negative whole number.
    NotWholeNumber {
        /// The list the item belongs to.
        list: ItemList,
        /// Zero-based position of the item in the list.
        index: usize,
        /// The wire name of the offending field.
        field: &'static str,
    },
    /// A requested quantity is below the configured minimum.
    QuantityBelowMinimum {
        /// The category the quantity belongs to.
        category_id: u32,
        /// The submitted quantity.
        quantity: u32,
        /// The configured minimum.
        minimum: u32,
    },
    /// A quantity exceeds the largest storable value.
    QuantityAboveMaximum {
        /// The list the item belongs to.
        list: ItemList,
        /// The category the quantity belongs to.
        category_id: u32,
        /// The submitted quantity.
        quantity: u32,
        /// The largest accepted quantity.
        maximum: u32,
    },
    /// A donated quantity is zero.
    QuantityNotPositive {
        /// The category the quantity belongs to.
        category_id: u32,
    },
    /// A category id appears more than once in one submission.
    DuplicateCategory {
        /// The list the duplicate was found in.
        list: ItemList,
        /// The repeated category id.
        category_id: u32,
    },
    /// The delivery method is not one of the enumerated values.
    InvalidDeliveryMethod(String),
    /// Courier delivery was chosen without a pickup address.
    MissingDonorAddress,
    /// A tracking status string is not recognised.
    InvalidTrackingStatus(String),
    /// A request status string is not recognised.
    InvalidRequestStatus(String),
    /// The request is in a state that no longer accepts donations.
    RequestNotAcceptingDonations {
        /// The request status that blocked the donation.
        status: RequestStatus,
    },
    /// One or more donated items exceed what the request still needs.
    ExceedsRemaining {
        /// Every offending item, in submission order.
        shortfalls: Vec<ItemShortfall>,
    },
    /// A tracking status change is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: TrackingStatus,
        /// The requested status.
        to: TrackingStatus,
        /// Why the change was rejected.
        reason: String,
    },
    /// Donors may only update self-delivery donations.
    NotSelfDelivery,
    /// The donation has already been confirmed by the school.
    AlreadyConfirmed,
    /// The donation was cancelled and cannot be confirmed.
    DonationCancelled,
    /// A request status change is not permitted.
    InvalidRequestTransition {
        /// The current status.
        from: RequestStatus,
        /// The requested status.
        to: RequestStatus,
    },
}

impl DomainError {
    /// Returns true if this error describes an action that is illegal in
    /// the entity's current lifecycle state, as opposed to malformed input.
    #[must_use]
    pub const fn is_state_violation(&self) -> bool {
        matches!(
            self,
            Self::RequestNotAcceptingDonations { .. }
                | Self::InvalidStatusTransition { .. }
                | Self::NotSelfDelivery
                | Self::AlreadyConfirmed
                | Self::DonationCancelled
                | Self::InvalidRequestTransition { .. }
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItemList(list) => {
                write!(f, "{} must contain at least one item", list.field_name())
            }
            Self::MissingItemField { list, index, field } => write!(
                f,
                "{}[{index}] is missing required field '{field}'",
                list.field_name()
            ),
            Self::NotWholeNumber { list, index, field } => write!(
                f,
                "{}[{index}].{field} must be a whole number",
                list.field_name()
            ),
            Self::QuantityBelowMinimum {
                category_id,
                quantity,
                minimum,
            } => write!(
                f,
                "Quantity {quantity} for category {category_id} is below the minimum of {minimum}"
            ),
            Self::QuantityAboveMaximum {
                category_id,
                quantity,
                maximum,
                ..
            } => write!(
                f,
                "Quantity {quantity} for category {category_id} exceeds the maximum of {maximum}"
            ),
            Self::QuantityNotPositive { category_id } => {
                write!(f, "Quantity for category {category_id} must be at least 1")
            }
            Self::DuplicateCategory { list, category_id } => write!(
                f,
                "Category {category_id} appears more than once in {}",
                list.field_name()
            ),
            Self::InvalidDeliveryMethod(value) => write!(
                f,
                "Invalid delivery method '{value}'. Must be 'Self-Delivery' or 'Courier'"
            ),
            Self::MissingDonorAddress => {
                write!(f, "A donor address is required for courier delivery")
            }
            Self::InvalidTrackingStatus(value) => write!(f, "Invalid tracking status '{value}'"),
            Self::InvalidRequestStatus(value) => write!(f, "Invalid request status '{value}'"),
            Self::RequestNotAcceptingDonations { status } => write!(
                f,
                "Request is '{status}' and no longer accepts donations"
            ),
            Self::ExceedsRemaining { shortfalls } => {
                write!(f, "Donation exceeds remaining quantities: ")?;
                for (i, shortfall) in shortfalls.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{shortfall}")?;
                }
                Ok(())
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::NotSelfDelivery => write!(
                f,
                "Donors can only update the status of self-delivery donations"
            ),
            Self::AlreadyConfirmed => write!(f, "Donation receipt has already been confirmed"),
            Self::DonationCancelled => write!(f, "Cancelled donations cannot be confirmed"),
            Self::InvalidRequestTransition { from, to } => {
                write!(f, "Cannot change request status from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
