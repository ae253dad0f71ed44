// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use school_aid_domain::{DonationRequest, RequestStatus, RequestedItem};
use std::collections::HashMap;
use tracing::debug;

use crate::convert::{category_from_column, parse_timestamp, quantity_from_column};
use crate::diesel_schema::{donation_requests, requested_items};
use crate::error::PersistenceError;

/// Diesel Queryable struct for request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = donation_requests)]
struct RequestRow {
    request_id: i64,
    school_id: i64,
    status: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Diesel Queryable struct for requested item rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = requested_items)]
struct RequestedItemRow {
    request_id: i64,
    category_id: i64,
    category_name_en: String,
    category_name_si: String,
    quantity: i32,
    quantity_received: i32,
}

impl TryFrom<RequestedItemRow> for RequestedItem {
    type Error = PersistenceError;

    fn try_from(row: RequestedItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category_id: category_from_column(row.category_id)?,
            category_name_en: row.category_name_en,
            category_name_si: row.category_name_si,
            quantity: quantity_from_column(row.quantity)?,
            quantity_received: quantity_from_column(row.quantity_received)?,
        })
    }
}

/// Loads the items of every listed request and assembles domain values,
/// preserving the order of `rows`.
fn assemble_requests(
    conn: &mut SqliteConnection,
    rows: Vec<RequestRow>,
) -> Result<Vec<DonationRequest>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.request_id).collect();
    let item_rows: Vec<RequestedItemRow> = requested_items::table
        .filter(requested_items::request_id.eq_any(&ids))
        .order((requested_items::request_id, requested_items::position))
        .select(RequestedItemRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_requested_items: {e}")))?;

    let mut items_by_request: HashMap<i64, Vec<RequestedItem>> = HashMap::new();
    for item_row in item_rows {
        let request_id: i64 = item_row.request_id;
        items_by_request
            .entry(request_id)
            .or_default()
            .push(RequestedItem::try_from(item_row)?);
    }

    rows.into_iter()
        .map(|row| {
            let status: RequestStatus = row
                .status
                .parse()
                .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
            Ok(DonationRequest {
                request_id: Some(row.request_id),
                school_id: row.school_id,
                items: items_by_request.remove(&row.request_id).unwrap_or_default(),
                status,
                notes: row.notes,
                created_at: parse_timestamp(&row.created_at)?,
                updated_at: parse_timestamp(&row.updated_at)?,
            })
        })
        .collect()
}

/// Retrieves a request with its items.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request does not exist.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<DonationRequest>, PersistenceError> {
    debug!(request_id, "Loading donation request");

    let row: Option<RequestRow> = donation_requests::table
        .filter(donation_requests::request_id.eq(request_id))
        .select(RequestRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_request: {e}")))?;

    match row {
        Some(row) => Ok(assemble_requests(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Lists the requests owned by a school, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_requests_for_school(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Vec<DonationRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = donation_requests::table
        .filter(donation_requests::school_id.eq(school_id))
        .order(donation_requests::request_id.desc())
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests_for_school: {e}")))?;

    assemble_requests(conn, rows)
}

/// Lists requests that still accept donations, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_open_requests(
    conn: &mut SqliteConnection,
) -> Result<Vec<DonationRequest>, PersistenceError> {
    let open: Vec<&str> = RequestStatus::ALL
        .iter()
        .filter(|status| !status.is_terminal())
        .map(RequestStatus::as_str)
        .collect();

    let rows: Vec<RequestRow> = donation_requests::table
        .filter(donation_requests::status.eq_any(open))
        .order(donation_requests::request_id.asc())
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_open_requests: {e}")))?;

    assemble_requests(conn, rows)
}

/// Lists every request, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_requests(
    conn: &mut SqliteConnection,
) -> Result<Vec<DonationRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = donation_requests::table
        .order(donation_requests::request_id.desc())
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_all_requests: {e}")))?;

    assemble_requests(conn, rows)
}
