// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation store writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid_domain::{Donation, TrackingStatus};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::convert::{format_timestamp, position_to_column, quantity_to_column};
use crate::diesel_schema::{donated_items, donations};
use crate::error::PersistenceError;

fn donation_id(donation: &Donation) -> Result<i64, PersistenceError> {
    donation
        .donation_id
        .ok_or_else(|| PersistenceError::Other(String::from("Donation has no ID")))
}

/// Inserts a new donation and its items.
///
/// # Returns
///
/// The donation ID assigned by the database.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_donation(
    conn: &mut SqliteConnection,
    donation: &Donation,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(donations::table)
        .values((
            donations::request_id.eq(donation.request_id),
            donations::donor_id.eq(donation.donor_id),
            donations::school_id.eq(donation.school_id),
            donations::delivery_method.eq(donation.delivery_method.as_str()),
            donations::donor_address.eq(donation.donor_address.as_deref()),
            donations::donor_remarks.eq(donation.donor_remarks.as_deref()),
            donations::tracking_status.eq(donation.tracking_status.as_str()),
            donations::school_confirmation.eq(i32::from(donation.school_confirmation)),
            donations::status_last_updated_at
                .eq(format_timestamp(donation.status_last_updated_at)?),
            donations::created_at.eq(format_timestamp(donation.created_at)?),
        ))
        .execute(conn)?;

    let donation_id: i64 = conn.get_last_insert_rowid()?;

    for (index, item) in donation.items.iter().enumerate() {
        diesel::insert_into(donated_items::table)
            .values((
                donated_items::donation_id.eq(donation_id),
                donated_items::position.eq(position_to_column(index)?),
                donated_items::category_id.eq(i64::from(item.category_id)),
                donated_items::category_name_en.eq(&item.category_name_en),
                donated_items::category_name_si.eq(&item.category_name_si),
                donated_items::quantity_donated.eq(quantity_to_column(item.quantity_donated)?),
            ))
            .execute(conn)?;
    }

    info!(
        donation_id,
        request_id = donation.request_id,
        donor_id = donation.donor_id,
        "Inserted donation"
    );
    Ok(donation_id)
}

/// Writes a tracking update, provided the stored status is still `previous`.
///
/// # Errors
///
/// Returns `Conflict` if the stored status changed since it was read.
pub fn update_donation_tracking(
    conn: &mut SqliteConnection,
    donation: &Donation,
    previous: TrackingStatus,
) -> Result<(), PersistenceError> {
    let donation_id: i64 = donation_id(donation)?;

    let updated: usize = diesel::update(donations::table)
        .filter(donations::donation_id.eq(donation_id))
        .filter(donations::tracking_status.eq(previous.as_str()))
        .set((
            donations::tracking_status.eq(donation.tracking_status.as_str()),
            donations::admin_tracking_id.eq(donation.admin_tracking_id.as_deref()),
            donations::admin_remarks.eq(donation.admin_remarks.as_deref()),
            donations::status_last_updated_at
                .eq(format_timestamp(donation.status_last_updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Donation {donation_id} is no longer '{previous}'"
        )));
    }

    debug!(donation_id, status = %donation.tracking_status, "Updated donation tracking");
    Ok(())
}

/// Marks a donation as received, provided it has not been confirmed yet.
///
/// # Errors
///
/// Returns `Conflict` if the donation was already confirmed.
pub fn confirm_donation(
    conn: &mut SqliteConnection,
    donation: &Donation,
) -> Result<(), PersistenceError> {
    let donation_id: i64 = donation_id(donation)?;
    let confirmed_at: Option<String> = donation
        .school_confirmation_at
        .map(format_timestamp)
        .transpose()?;

    let updated: usize = diesel::update(donations::table)
        .filter(donations::donation_id.eq(donation_id))
        .filter(donations::school_confirmation.eq(0))
        .set((
            donations::school_confirmation.eq(1),
            donations::school_confirmation_at.eq(confirmed_at),
            donations::tracking_status.eq(donation.tracking_status.as_str()),
            donations::status_last_updated_at
                .eq(format_timestamp(donation.status_last_updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Donation {donation_id} has already been confirmed"
        )));
    }

    info!(donation_id, "Confirmed donation receipt");
    Ok(())
}
