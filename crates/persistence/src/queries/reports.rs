// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregates for the administrator summary.

use diesel::SqliteConnection;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;

use crate::data_models::{CategoryTotal, StatusCount, SummaryReport};
use crate::diesel_schema::{donation_requests, donations, requested_items};
use crate::error::PersistenceError;

/// Counts requests grouped by status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_requests_by_status(
    conn: &mut SqliteConnection,
) -> Result<Vec<StatusCount>, PersistenceError> {
    let rows: Vec<(String, i64)> = donation_requests::table
        .group_by(donation_requests::status)
        .select((donation_requests::status, count_star()))
        .order(donation_requests::status.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_requests_by_status: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect())
}

/// Counts donations grouped by tracking status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_donations_by_status(
    conn: &mut SqliteConnection,
) -> Result<Vec<StatusCount>, PersistenceError> {
    let rows: Vec<(String, i64)> = donations::table
        .group_by(donations::tracking_status)
        .select((donations::tracking_status, count_star()))
        .order(donations::tracking_status.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_donations_by_status: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect())
}

/// Sums requested and received quantities per category across all requests.
///
/// The English name reported is the smallest one seen for the category.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn category_totals(
    conn: &mut SqliteConnection,
) -> Result<Vec<CategoryTotal>, PersistenceError> {
    let rows: Vec<(i64, Option<String>, Option<i64>, Option<i64>)> = requested_items::table
        .group_by(requested_items::category_id)
        .select((
            requested_items::category_id,
            diesel::dsl::min(requested_items::category_name_en),
            sum(requested_items::quantity),
            sum(requested_items::quantity_received),
        ))
        .order(requested_items::category_id.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("category_totals: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(category_id, name, requested, received)| CategoryTotal {
            category_id,
            category_name_en: name.unwrap_or_default(),
            requested: requested.unwrap_or(0),
            received: received.unwrap_or(0),
        })
        .collect())
}

/// Builds the full administrator summary.
///
/// # Errors
///
/// Returns an error if any aggregate query fails.
pub fn summary_report(conn: &mut SqliteConnection) -> Result<SummaryReport, PersistenceError> {
    Ok(SummaryReport {
        requests_by_status: count_requests_by_status(conn)?,
        donations_by_status: count_donations_by_status(conn)?,
        category_totals: category_totals(conn)?,
    })
}
