// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid_domain::{DeliveryMethod, DonatedItem, Donation, TrackingStatus};
use std::collections::HashMap;
use tracing::debug;

use crate::convert::{
    category_from_column, parse_optional_timestamp, parse_timestamp, quantity_from_column,
};
use crate::diesel_schema::{donated_items, donations};
use crate::error::PersistenceError;

/// Diesel Queryable struct for donation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = donations)]
struct DonationRow {
    donation_id: i64,
    request_id: i64,
    donor_id: i64,
    school_id: i64,
    delivery_method: String,
    donor_address: Option<String>,
    donor_remarks: Option<String>,
    tracking_status: String,
    admin_tracking_id: Option<String>,
    admin_remarks: Option<String>,
    school_confirmation: i32,
    school_confirmation_at: Option<String>,
    status_last_updated_at: String,
    created_at: String,
}

/// Diesel Queryable struct for donated item rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = donated_items)]
struct DonatedItemRow {
    donation_id: i64,
    category_id: i64,
    category_name_en: String,
    category_name_si: String,
    quantity_donated: i32,
}

fn assemble_donations(
    conn: &mut SqliteConnection,
    rows: Vec<DonationRow>,
) -> Result<Vec<Donation>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.donation_id).collect();
    let item_rows: Vec<DonatedItemRow> = donated_items::table
        .filter(donated_items::donation_id.eq_any(&ids))
        .order((donated_items::donation_id, donated_items::position))
        .select(DonatedItemRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_donated_items: {e}")))?;

    let mut items_by_donation: HashMap<i64, Vec<DonatedItem>> = HashMap::new();
    for item in item_rows {
        items_by_donation
            .entry(item.donation_id)
            .or_default()
            .push(DonatedItem {
                category_id: category_from_column(item.category_id)?,
                category_name_en: item.category_name_en,
                category_name_si: item.category_name_si,
                quantity_donated: quantity_from_column(item.quantity_donated)?,
            });
    }

    let reconstruct = |e: school_aid_domain::DomainError| {
        PersistenceError::ReconstructionError(e.to_string())
    };

    rows.into_iter()
        .map(|row| {
            let delivery_method: DeliveryMethod =
                row.delivery_method.parse().map_err(reconstruct)?;
            let tracking_status: TrackingStatus =
                row.tracking_status.parse().map_err(reconstruct)?;
            Ok(Donation {
                donation_id: Some(row.donation_id),
                request_id: row.request_id,
                donor_id: row.donor_id,
                school_id: row.school_id,
                items: items_by_donation
                    .remove(&row.donation_id)
                    .unwrap_or_default(),
                delivery_method,
                donor_address: row.donor_address,
                donor_remarks: row.donor_remarks,
                tracking_status,
                admin_tracking_id: row.admin_tracking_id,
                admin_remarks: row.admin_remarks,
                school_confirmation: row.school_confirmation != 0,
                school_confirmation_at: parse_optional_timestamp(
                    row.school_confirmation_at.as_deref(),
                )?,
                status_last_updated_at: parse_timestamp(&row.status_last_updated_at)?,
                created_at: parse_timestamp(&row.created_at)?,
            })
        })
        .collect()
}

/// Retrieves a donation with its items.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the donation does not exist.
pub fn get_donation(
    conn: &mut SqliteConnection,
    donation_id: i64,
) -> Result<Option<Donation>, PersistenceError> {
    debug!(donation_id, "Loading donation");

    let row: Option<DonationRow> = donations::table
        .filter(donations::donation_id.eq(donation_id))
        .select(DonationRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_donation: {e}")))?;

    match row {
        Some(row) => Ok(assemble_donations(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Lists the donations pledged by a donor, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_donations_for_donor(
    conn: &mut SqliteConnection,
    donor_id: i64,
) -> Result<Vec<Donation>, PersistenceError> {
    let rows: Vec<DonationRow> = donations::table
        .filter(donations::donor_id.eq(donor_id))
        .order(donations::donation_id.desc())
        .select(DonationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_donations_for_donor: {e}")))?;

    assemble_donations(conn, rows)
}

/// Lists the donations made to a school's requests, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_donations_for_school(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<Donation>, PersistenceError> {
    let rows: Vec<DonationRow> = donations::table
        .filter(donations::school_id.eq(school_id))
        .order(donations::donation_id.desc())
        .select(DonationRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_donations_for_school: {e}")))?;

    assemble_donations(conn, rows)
}
