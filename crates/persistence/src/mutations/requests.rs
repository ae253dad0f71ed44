// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request store writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid_domain::{DonationRequest, RequestStatus};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::convert::{format_timestamp, position_to_column, quantity_to_column};
use crate::diesel_schema::{donation_requests, requested_items};
use crate::error::PersistenceError;

/// Inserts a new request and its items.
///
/// # Returns
///
/// The request ID assigned by the database.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    request: &DonationRequest,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(donation_requests::table)
        .values((
            donation_requests::school_id.eq(request.school_id),
            donation_requests::status.eq(request.status.as_str()),
            donation_requests::notes.eq(request.notes.as_deref()),
            donation_requests::created_at.eq(format_timestamp(request.created_at)?),
            donation_requests::updated_at.eq(format_timestamp(request.updated_at)?),
        ))
        .execute(conn)?;

    let request_id: i64 = conn.get_last_insert_rowid()?;

    for (index, item) in request.items.iter().enumerate() {
        diesel::insert_into(requested_items::table)
            .values((
                requested_items::request_id.eq(request_id),
                requested_items::position.eq(position_to_column(index)?),
                requested_items::category_id.eq(i64::from(item.category_id)),
                requested_items::category_name_en.eq(&item.category_name_en),
                requested_items::category_name_si.eq(&item.category_name_si),
                requested_items::quantity.eq(quantity_to_column(item.quantity)?),
                requested_items::quantity_received.eq(quantity_to_column(item.quantity_received)?),
            ))
            .execute(conn)?;
    }

    info!(
        request_id,
        school_id = request.school_id,
        items = request.items.len(),
        "Inserted donation request"
    );
    Ok(request_id)
}

/// Writes an explicit status change, provided the stored status is still `previous`.
///
/// # Errors
///
/// Returns `Conflict` if the stored status changed since it was read.
pub fn update_request_status(
    conn: &mut SqliteConnection,
    request: &DonationRequest,
    previous: RequestStatus,
) -> Result<(), PersistenceError> {
    let request_id: i64 = request
        .request_id
        .ok_or_else(|| PersistenceError::Other(String::from("Request has no ID")))?;

    let updated: usize = diesel::update(donation_requests::table)
        .filter(donation_requests::request_id.eq(request_id))
        .filter(donation_requests::status.eq(previous.as_str()))
        .set((
            donation_requests::status.eq(request.status.as_str()),
            donation_requests::updated_at.eq(format_timestamp(request.updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Request {request_id} is no longer '{previous}'"
        )));
    }

    debug!(request_id, status = %request.status, "Updated request status");
    Ok(())
}

/// Writes reconciled received counters and the recomputed status.
///
/// # Errors
///
/// Returns an error if any update fails.
pub fn update_request_counters(
    conn: &mut SqliteConnection,
    request: &DonationRequest,
) -> Result<(), PersistenceError> {
    let request_id: i64 = request
        .request_id
        .ok_or_else(|| PersistenceError::Other(String::from("Request has no ID")))?;

    for item in &request.items {
        diesel::update(requested_items::table)
            .filter(requested_items::request_id.eq(request_id))
            .filter(requested_items::category_id.eq(i64::from(item.category_id)))
            .set(requested_items::quantity_received.eq(quantity_to_column(item.quantity_received)?))
            .execute(conn)?;
    }

    diesel::update(donation_requests::table)
        .filter(donation_requests::request_id.eq(request_id))
        .set((
            donation_requests::status.eq(request.status.as_str()),
            donation_requests::updated_at.eq(format_timestamp(request.updated_at)?),
        ))
        .execute(conn)?;

    debug!(request_id, status = %request.status, "Updated request counters");
    Ok(())
}
