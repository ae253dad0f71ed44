// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{DonationCommand, RequestCommand};
use crate::error::CoreError;
use crate::state::{
    ConfirmationResult, Notification, Recipient, TransitionResult, donation_snapshot,
    request_snapshot,
};
use school_aid_audit::{Action, Actor, AuditEvent, EntityRef, StateSnapshot};
use school_aid_domain::{
    Donation, DonationDraft, DonationRequest, ReconcileOutcome, RequestPolicy, RequestStatus,
    RequestedItemDraft, TrackingStatus, reconcile_confirmed_donation, validate_admin_transition,
    validate_donation, validate_donor_transition, validate_requested_items,
    validate_school_confirmation,
};
use time::OffsetDateTime;
use tracing::{info, warn};

/// Trims optional free text, treating blank as absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Applies an admin field update: `None` keeps, empty clears, anything else sets.
fn apply_optional_update(current: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        *current = optional_text(Some(value));
    }
}

/// Validates a school's submission and builds the new request.
///
/// The owning school is the actor. The audit event refers to entity id 0
/// until the request is stored.
///
/// # Errors
///
/// Returns an error if the item list violates any validation rule.
pub fn submit_request(
    drafts: &[RequestedItemDraft],
    notes: Option<String>,
    policy: &RequestPolicy,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult<DonationRequest>, CoreError> {
    let items = validate_requested_items(drafts, policy)?;
    let request: DonationRequest =
        DonationRequest::new(actor.account_id, items, optional_text(notes), now);

    let action: Action = Action::new(
        String::from("CreateRequest"),
        Some(format!(
            "Requested {} categories, {} items in total",
            request.items.len(),
            request
                .items
                .iter()
                .map(|item| u64::from(item.quantity))
                .sum::<u64>()
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        action,
        EntityRef::request(0),
        StateSnapshot::empty(),
        request_snapshot(&request),
        now,
    );

    Ok(TransitionResult {
        entity: request,
        audit_event,
        notifications: Vec::new(),
        warnings: Vec::new(),
    })
}

/// Applies an explicit cancel or close to a request.
///
/// # Errors
///
/// Returns an error if the request is not persisted or its current
/// status does not allow the change.
pub fn apply_request_command(
    request: &DonationRequest,
    command: RequestCommand,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult<DonationRequest>, CoreError> {
    let request_id: i64 = request
        .request_id
        .ok_or(CoreError::NotPersisted("Donation request"))?;

    let (target, name): (RequestStatus, &str) = match command {
        RequestCommand::Cancel => {
            request.validate_cancel()?;
            (RequestStatus::Cancelled, "CancelRequest")
        }
        RequestCommand::Close => {
            request.validate_close()?;
            (RequestStatus::Closed, "CloseRequest")
        }
    };

    let before: StateSnapshot = request_snapshot(request);
    let mut updated: DonationRequest = request.clone();
    updated.status = target;
    updated.updated_at = now;

    let mut notifications: Vec<Notification> = Vec::new();
    if command == RequestCommand::Close {
        notifications.push(Notification::new(
            Recipient::School(request.school_id),
            "Donation request closed",
            format!("Your donation request #{request_id} has been closed by an administrator."),
        ));
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        Action::new(
            name.to_string(),
            Some(format!("Request status '{}' -> '{target}'", request.status)),
        ),
        EntityRef::request(request_id),
        before,
        request_snapshot(&updated),
        now,
    );

    Ok(TransitionResult {
        entity: updated,
        audit_event,
        notifications,
        warnings: Vec::new(),
    })
}

/// Validates a donor's pledge against the request and builds the donation.
///
/// The donor is the actor. The new donation starts in `Preparing`.
///
/// # Errors
///
/// Returns an error if the request is not persisted or the pledge
/// violates any donation rule.
pub fn pledge_donation(
    request: &DonationRequest,
    draft: &DonationDraft,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult<Donation>, CoreError> {
    let request_id: i64 = request
        .request_id
        .ok_or(CoreError::NotPersisted("Donation request"))?;
    let (items, delivery_method) = validate_donation(request, draft)?;

    let donation: Donation = Donation {
        donation_id: None,
        request_id,
        donor_id: actor.account_id,
        school_id: request.school_id,
        items,
        delivery_method,
        donor_address: optional_text(draft.donor_address.clone()),
        donor_remarks: optional_text(draft.donor_remarks.clone()),
        tracking_status: TrackingStatus::Preparing,
        admin_tracking_id: None,
        admin_remarks: None,
        school_confirmation: false,
        school_confirmation_at: None,
        status_last_updated_at: now,
        created_at: now,
    };

    let notifications: Vec<Notification> = vec![Notification::new(
        Recipient::School(request.school_id),
        "New donation pledged",
        format!(
            "A donor has pledged {} items against your request #{request_id} ({}).",
            donation.total_quantity(),
            donation.delivery_method
        ),
    )];

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        Action::new(
            String::from("PledgeDonation"),
            Some(format!(
                "Pledged {} categories against request {request_id}",
                donation.items.len()
            )),
        ),
        EntityRef::donation(0),
        StateSnapshot::empty(),
        donation_snapshot(&donation),
        now,
    );

    Ok(TransitionResult {
        entity: donation,
        audit_event,
        notifications,
        warnings: Vec::new(),
    })
}

/// Applies a donor or administrator tracking update to a donation.
///
/// Ownership and role are checked by the caller; this applies the
/// transition rules of the command's rule set.
///
/// # Errors
///
/// Returns an error if the donation is not persisted, the status string
/// is unknown, or the transition is not allowed.
pub fn apply_donation_command(
    donation: &Donation,
    command: DonationCommand,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult<Donation>, CoreError> {
    let donation_id: i64 = donation
        .donation_id
        .ok_or(CoreError::NotPersisted("Donation"))?;
    let before: StateSnapshot = donation_snapshot(donation);
    let previous: TrackingStatus = donation.tracking_status;
    let mut updated: Donation = donation.clone();

    let (name, notifications): (&str, Vec<Notification>) = match command {
        DonationCommand::DonorUpdateStatus { new_status } => {
            let target: TrackingStatus = new_status.parse()?;
            validate_donor_transition(donation, target)?;
            updated.set_status(target, now);

            let notification: Notification = Notification::new(
                Recipient::School(donation.school_id),
                "Donation status updated",
                format!(
                    "Donation #{donation_id} for request #{} is now '{target}'.",
                    donation.request_id
                ),
            );
            ("UpdateDonationStatus", vec![notification])
        }
        DonationCommand::AdminUpdate {
            new_status,
            admin_tracking_id,
            admin_remarks,
        } => {
            let target: TrackingStatus = new_status.parse()?;
            validate_admin_transition(previous, target)?;
            updated.set_status(target, now);
            apply_optional_update(&mut updated.admin_tracking_id, admin_tracking_id);
            apply_optional_update(&mut updated.admin_remarks, admin_remarks);

            let message: String = updated.admin_tracking_id.as_ref().map_or_else(
                || format!("Donation #{donation_id} is now '{target}'."),
                |tracking_id| {
                    format!("Donation #{donation_id} is now '{target}' (tracking id {tracking_id}).")
                },
            );
            let notifications: Vec<Notification> = vec![
                Notification::new(
                    Recipient::Donor(donation.donor_id),
                    "Donation status updated by administrator",
                    message.clone(),
                ),
                Notification::new(
                    Recipient::School(donation.school_id),
                    "Donation status updated by administrator",
                    message,
                ),
            ];
            ("AdminUpdateDonation", notifications)
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        Action::new(
            name.to_string(),
            Some(format!(
                "Tracking status '{previous}' -> '{}'",
                updated.tracking_status
            )),
        ),
        EntityRef::donation(donation_id),
        before,
        donation_snapshot(&updated),
        now,
    );

    Ok(TransitionResult {
        entity: updated,
        audit_event,
        notifications,
        warnings: Vec::new(),
    })
}

/// Confirms receipt of a donation and reconciles its parent request.
///
/// `parent` is the stored request the donation references, or `None`
/// if it could not be found, in which case the confirmation still
/// succeeds and the anomaly is returned as a warning.
///
/// # Errors
///
/// Returns an error if the donation is not persisted, already
/// confirmed or cancelled.
pub fn confirm_receipt(
    donation: &Donation,
    parent: Option<&DonationRequest>,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<ConfirmationResult, CoreError> {
    let donation_id: i64 = donation
        .donation_id
        .ok_or(CoreError::NotPersisted("Donation"))?;
    let mut warnings: Vec<String> = Vec::new();

    if let Some(warning) = validate_school_confirmation(donation)? {
        warn!(donation_id, "{warning}");
        warnings.push(warning);
    }

    let before: StateSnapshot = donation_snapshot(donation);
    let mut confirmed: Donation = donation.clone();
    confirmed.school_confirmation = true;
    confirmed.school_confirmation_at = Some(now);
    confirmed.set_status(TrackingStatus::ReceivedBySchool, now);

    let (request, reconcile): (Option<DonationRequest>, Option<ReconcileOutcome>) = match parent
    {
        Some(parent) => {
            let mut request: DonationRequest = parent.clone();
            let outcome: ReconcileOutcome =
                reconcile_confirmed_donation(&mut request, &confirmed.items, now);
            for category_id in &outcome.skipped_categories {
                let warning: String = format!(
                    "Category {category_id} is not part of request #{}; skipped during reconciliation",
                    donation.request_id
                );
                warn!(donation_id, request_id = donation.request_id, "{warning}");
                warnings.push(warning);
            }
            for category_id in &outcome.capped_categories {
                let requested: u32 = request
                    .item(*category_id)
                    .map_or(0, |item| item.quantity);
                let warning: String = format!(
                    "Category {category_id} on request #{} received more than was outstanding; capped at {requested}",
                    donation.request_id
                );
                warn!(donation_id, request_id = donation.request_id, "{warning}");
                warnings.push(warning);
            }
            info!(
                donation_id,
                request_id = donation.request_id,
                previous_status = %outcome.previous_status,
                new_status = %outcome.new_status,
                "Reconciled confirmed donation"
            );
            (Some(request), Some(outcome))
        }
        None => {
            let warning: String = format!(
                "Request #{} was not found; reconciliation skipped",
                donation.request_id
            );
            warn!(donation_id, request_id = donation.request_id, "{warning}");
            warnings.push(warning);
            (None, None)
        }
    };

    let details: String = reconcile.as_ref().map_or_else(
        || String::from("Receipt confirmed; request not reconciled"),
        |outcome| {
            format!(
                "Receipt confirmed; {} categories reconciled, request status '{}' -> '{}'",
                outcome.updated_categories.len(),
                outcome.previous_status,
                outcome.new_status
            )
        },
    );

    let notifications: Vec<Notification> = vec![Notification::new(
        Recipient::Donor(donation.donor_id),
        "Donation received",
        format!(
            "The school has confirmed receipt of your donation #{donation_id}. Thank you!"
        ),
    )];

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        Action::new(String::from("ConfirmReceipt"), Some(details)),
        EntityRef::donation(donation_id),
        before,
        donation_snapshot(&confirmed),
        now,
    );

    Ok(ConfirmationResult {
        donation: confirmed,
        request,
        reconcile,
        audit_event,
        notifications,
        warnings,
    })
}
