// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status enumerations for requests and donations.
//!
//! The string forms are the wire and storage representation and must
//! stay stable.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregate status of a donation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Nothing has been received yet.
    #[serde(rename = "Pending")]
    Pending,
    /// At least one category has received items, but not all are complete.
    #[serde(rename = "Partially Fulfilled")]
    PartiallyFulfilled,
    /// Every category has received its full requested quantity.
    #[serde(rename = "Fulfilled")]
    Fulfilled,
    /// Closed by an administrator.
    #[serde(rename = "Closed")]
    Closed,
    /// Cancelled by the owning school.
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl RequestStatus {
    /// All request statuses, in display order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::PartiallyFulfilled,
        Self::Fulfilled,
        Self::Closed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::PartiallyFulfilled => "Partially Fulfilled",
            Self::Fulfilled => "Fulfilled",
            Self::Closed => "Closed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if the request no longer accepts new donations.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Closed | Self::Cancelled)
    }

    /// Returns true if the status was set by an explicit action and must
    /// not be overwritten by quantity-based recomputation.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRequestStatus(s.to_string()))
    }
}

/// Tracking status of a single donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingStatus {
    #[serde(rename = "Pending Confirmation")]
    PendingConfirmation,
    #[serde(rename = "Preparing")]
    Preparing,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Delivered")]
    Delivered,
    #[serde(rename = "Received by School")]
    ReceivedBySchool,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl TrackingStatus {
    /// All tracking statuses. This is also the set an administrator may assign.
    pub const ALL: [Self; 6] = [
        Self::PendingConfirmation,
        Self::Preparing,
        Self::InTransit,
        Self::Delivered,
        Self::ReceivedBySchool,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingConfirmation => "Pending Confirmation",
            Self::Preparing => "Preparing",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::ReceivedBySchool => "Received by School",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ReceivedBySchool | Self::Cancelled)
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidTrackingStatus(s.to_string()))
    }
}

/// How donated items travel to the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMethod {
    /// The donor brings the items personally and reports progress.
    #[serde(rename = "Self-Delivery")]
    SelfDelivery,
    /// A courier collects from the donor address; progress is tracked by admins.
    #[serde(rename = "Courier")]
    Courier,
}

impl DeliveryMethod {
    /// Returns the string representation of the delivery method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelfDelivery => "Self-Delivery",
            Self::Courier => "Courier",
        }
    }

    /// Returns true if a donor pickup address is mandatory.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self, Self::Courier)
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Self-Delivery" => Ok(Self::SelfDelivery),
            "Courier" => Ok(Self::Courier),
            _ => Err(DomainError::InvalidDeliveryMethod(s.to_string())),
        }
    }
}
