// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use school_aid_audit::{AuditEvent, StateSnapshot};
use school_aid_domain::{Donation, DonationRequest, ReconcileOutcome};

/// Who a notification is addressed to.
///
/// Addresses are resolved by the caller from the account store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    School(i64),
    Donor(i64),
}

/// A best-effort message produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: Recipient,
    pub subject: String,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(recipient: Recipient, subject: &str, message: String) -> Self {
        Self {
            recipient,
            subject: subject.to_string(),
            message,
        }
    }
}

/// The result of a successful state transition on one entity.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult<T> {
    /// The entity after the transition.
    pub entity: T,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Messages to send once the new state is stored.
    pub notifications: Vec<Notification>,
    /// Non-blocking anomalies to report alongside success.
    pub warnings: Vec<String>,
}

/// The result of a school confirming receipt of a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationResult {
    /// The confirmed donation.
    pub donation: Donation,
    /// The reconciled parent request, if it could be found.
    pub request: Option<DonationRequest>,
    /// What reconciliation changed, if it ran.
    pub reconcile: Option<ReconcileOutcome>,
    pub audit_event: AuditEvent,
    pub notifications: Vec<Notification>,
    pub warnings: Vec<String>,
}

/// Converts a request to a snapshot for audit purposes.
#[must_use]
pub fn request_snapshot(request: &DonationRequest) -> StateSnapshot {
    let items: Vec<String> = request
        .items
        .iter()
        .map(|item| {
            format!(
                "{}:{}/{}",
                item.category_id, item.quantity_received, item.quantity
            )
        })
        .collect();
    StateSnapshot::new(format!(
        "status={},items=[{}]",
        request.status,
        items.join(",")
    ))
}

/// Converts a donation to a snapshot for audit purposes.
#[must_use]
pub fn donation_snapshot(donation: &Donation) -> StateSnapshot {
    StateSnapshot::new(format!(
        "trackingStatus={},schoolConfirmation={},adminTrackingId={},items={}",
        donation.tracking_status,
        donation.school_confirmation,
        donation.admin_tracking_id.as_deref().unwrap_or("-"),
        donation.total_quantity()
    ))
}
