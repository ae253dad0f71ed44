// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional persistence of core transition results.
//!
//! Each function writes the entity change and its audit event in one
//! transaction, so a stored change always has its audit record.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid::{ConfirmationResult, TransitionResult};
use school_aid_domain::{Donation, DonationRequest, RequestStatus, TrackingStatus};
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::donations::{confirm_donation, insert_donation, update_donation_tracking};
use crate::mutations::requests::{insert_request, update_request_counters, update_request_status};

/// IDs assigned when a new entity is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistCreateResult {
    /// The ID of the new request or donation.
    pub entity_id: i64,
    /// The ID of the audit event recording its creation.
    pub event_id: i64,
}

/// Stores a newly submitted request.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is stored in that case.
pub fn persist_new_request(
    conn: &mut SqliteConnection,
    result: &TransitionResult<DonationRequest>,
) -> Result<PersistCreateResult, PersistenceError> {
    conn.transaction(|conn| {
        let entity_id: i64 = insert_request(conn, &result.entity)?;
        let event_id: i64 =
            persist_audit_event(conn, &result.audit_event.clone().with_entity_id(entity_id))?;
        Ok(PersistCreateResult {
            entity_id,
            event_id,
        })
    })
}

/// Stores an explicit request status change.
///
/// # Errors
///
/// Returns `Conflict` if the request changed since it was read.
pub fn persist_request_update(
    conn: &mut SqliteConnection,
    result: &TransitionResult<DonationRequest>,
    previous: RequestStatus,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        update_request_status(conn, &result.entity, previous)?;
        persist_audit_event(conn, &result.audit_event)
    })
}

/// Stores a newly pledged donation.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is stored in that case.
pub fn persist_new_donation(
    conn: &mut SqliteConnection,
    result: &TransitionResult<Donation>,
) -> Result<PersistCreateResult, PersistenceError> {
    conn.transaction(|conn| {
        let entity_id: i64 = insert_donation(conn, &result.entity)?;
        let event_id: i64 =
            persist_audit_event(conn, &result.audit_event.clone().with_entity_id(entity_id))?;
        Ok(PersistCreateResult {
            entity_id,
            event_id,
        })
    })
}

/// Stores a donor or administrator tracking update.
///
/// # Errors
///
/// Returns `Conflict` if the donation changed since it was read.
pub fn persist_donation_update(
    conn: &mut SqliteConnection,
    result: &TransitionResult<Donation>,
    previous: TrackingStatus,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        update_donation_tracking(conn, &result.entity, previous)?;
        persist_audit_event(conn, &result.audit_event)
    })
}

/// Stores a confirmation together with the reconciled request.
///
/// The donation write is conditional on it being unconfirmed, so two
/// concurrent confirmations cannot both increment the counters.
///
/// # Errors
///
/// Returns `Conflict` if the donation was already confirmed; nothing
/// is stored in that case.
pub fn persist_confirmation(
    conn: &mut SqliteConnection,
    result: &ConfirmationResult,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        confirm_donation(conn, &result.donation)?;
        if let Some(request) = &result.request {
            update_request_counters(conn, request)?;
        }
        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;
        info!(
            donation_id = ?result.donation.donation_id,
            reconciled = result.request.is_some(),
            "Persisted confirmation"
        );
        Ok(event_id)
    })
}
