// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tracking status transition rules.
//!
//! Three rule sets exist, one per actor kind:
//! - donors walk self-delivery donations forward one step at a time
//! - administrators may assign any status, except out of a terminal one
//! - schools confirm receipt, which is terminal

use crate::donation::Donation;
use crate::error::DomainError;
use crate::status::{DeliveryMethod, TrackingStatus};

/// The ordered statuses a donor may move a self-delivery donation through.
pub const DONOR_PROGRESSION: [TrackingStatus; 3] = [
    TrackingStatus::Preparing,
    TrackingStatus::InTransit,
    TrackingStatus::Delivered,
];

fn progression_index(status: TrackingStatus) -> Option<usize> {
    DONOR_PROGRESSION.iter().position(|s| *s == status)
}

/// Validates a donor-initiated status change.
///
/// # Errors
///
/// Returns an error if:
/// - The donation is not self-delivered
/// - The current status is terminal
/// - The target is outside the progression (other than `Cancelled`)
/// - The target moves backwards or skips a step
pub fn validate_donor_transition(
    donation: &Donation,
    target: TrackingStatus,
) -> Result<(), DomainError> {
    if donation.delivery_method != DeliveryMethod::SelfDelivery {
        return Err(DomainError::NotSelfDelivery);
    }

    let current: TrackingStatus = donation.tracking_status;
    let reject = |reason: &str| DomainError::InvalidStatusTransition {
        from: current,
        to: target,
        reason: reason.to_string(),
    };

    if current.is_terminal() {
        return Err(reject("donation is already in a final state"));
    }

    if target == TrackingStatus::Cancelled {
        return Ok(());
    }

    let Some(target_index) = progression_index(target) else {
        return Err(reject("donors may only set Preparing, In Transit, Delivered or Cancelled"));
    };

    // A current status outside the progression sits just before its start.
    match progression_index(current) {
        Some(current_index) if target_index < current_index => {
            Err(reject("status cannot move backwards"))
        }
        Some(current_index) if target_index > current_index + 1 => {
            Err(reject("status cannot skip a step"))
        }
        None if target_index > 0 => Err(reject("status cannot skip a step")),
        _ => Ok(()),
    }
}

/// Validates an administrator-initiated status change.
///
/// Re-assigning the current terminal status is accepted so that an
/// administrator can update tracking details without changing status.
///
/// # Errors
///
/// Returns an error if the current status is terminal and the target differs.
pub fn validate_admin_transition(
    current: TrackingStatus,
    target: TrackingStatus,
) -> Result<(), DomainError> {
    if current.is_terminal() && current != target {
        return Err(DomainError::InvalidStatusTransition {
            from: current,
            to: target,
            reason: format!("'{current}' is final once set"),
        });
    }
    Ok(())
}

/// Validates a school's confirmation of receipt.
///
/// Ownership is checked by the caller. On success returns an optional
/// warning for courier deliveries that were never reported as shipped.
///
/// # Errors
///
/// Returns an error if the donation is already confirmed or cancelled.
pub fn validate_school_confirmation(donation: &Donation) -> Result<Option<String>, DomainError> {
    if donation.is_confirmed() {
        return Err(DomainError::AlreadyConfirmed);
    }
    if donation.tracking_status == TrackingStatus::Cancelled {
        return Err(DomainError::DonationCancelled);
    }

    let shipped: bool = matches!(
        donation.tracking_status,
        TrackingStatus::InTransit | TrackingStatus::Delivered
    );
    if donation.delivery_method == DeliveryMethod::Courier && !shipped {
        return Ok(Some(format!(
            "Courier donation confirmed while status was '{}'",
            donation.tracking_status
        )));
    }

    Ok(None)
}
