// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! All types use camelCase keys on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Accounts
// ============================================================================

/// API request to self-register a School or Donor account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
    /// `School` or `Donor`.
    pub role: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_name: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    pub account: AccountInfo,
    /// RFC 3339 expiry of the session.
    pub expires_at: String,
}

// ============================================================================
// Requests
// ============================================================================

/// One requested item as submitted.
///
/// Numbers are accepted as any JSON number and checked for being whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItemInput {
    pub category_id: Option<f64>,
    pub category_name_english: Option<String>,
    pub category_name_sinhala: Option<String>,
    pub quantity: Option<f64>,
}

/// API request to create a donation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequestRequest {
    #[serde(default)]
    pub requested_items: Vec<RequestedItemInput>,
    pub notes: Option<String>,
}

/// A requested item with its progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItemInfo {
    pub category_id: u32,
    pub category_name_english: String,
    pub category_name_sinhala: String,
    pub quantity: u32,
    pub quantity_received: u32,
    /// `quantity - quantityReceived`.
    pub remaining: u32,
}

/// The school that owns a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    pub account_id: i64,
    pub display_name: String,
    pub email: String,
}

/// A donation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestInfo {
    pub request_id: i64,
    pub school_id: i64,
    /// Populated on single-request reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<SchoolInfo>,
    pub requested_items: Vec<RequestedItemInfo>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// API response for request listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDonationRequestsResponse {
    pub requests: Vec<DonationRequestInfo>,
}

/// API response for request writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestWriteResponse {
    pub request: DonationRequestInfo,
    /// The audit event recording the change.
    pub event_id: i64,
    pub message: String,
    pub warnings: Vec<String>,
}

// ============================================================================
// Donations
// ============================================================================

/// One donated item as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonatedItemInput {
    pub category_id: Option<f64>,
    pub category_name_english: Option<String>,
    pub category_name_sinhala: Option<String>,
    pub quantity_donated: Option<f64>,
}

/// API request to pledge a donation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    /// The parent request id, as submitted. Only an integer or a string
    /// holding one can name a request.
    #[serde(default)]
    pub donation_request_id: Value,
    #[serde(default)]
    pub items_donated: Vec<DonatedItemInput>,
    #[serde(default)]
    pub delivery_method: String,
    pub donor_address: Option<String>,
    pub donor_remarks: Option<String>,
}

/// A pledged item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonatedItemInfo {
    pub category_id: u32,
    pub category_name_english: String,
    pub category_name_sinhala: String,
    pub quantity_donated: u32,
}

/// A donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationInfo {
    pub donation_id: i64,
    pub donation_request_id: i64,
    pub donor_id: i64,
    pub school_id: i64,
    pub items_donated: Vec<DonatedItemInfo>,
    pub delivery_method: String,
    pub donor_address: Option<String>,
    pub donor_remarks: Option<String>,
    pub tracking_status: String,
    pub admin_tracking_id: Option<String>,
    pub admin_remarks: Option<String>,
    pub school_confirmation: bool,
    pub school_confirmation_at: Option<String>,
    pub status_last_updated_at: String,
    pub created_at: String,
}

/// API response for donation listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDonationsResponse {
    pub donations: Vec<DonationInfo>,
}

/// API request for a donor status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationStatusRequest {
    pub new_status: String,
}

/// API request for an administrator status update.
///
/// An absent tracking field is left unchanged; an empty one is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateDonationRequest {
    pub new_status: String,
    pub admin_tracking_id: Option<String>,
    pub admin_remarks: Option<String>,
}

/// API response for donation writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationWriteResponse {
    pub donation: DonationInfo,
    /// The audit event recording the change.
    pub event_id: i64,
    pub message: String,
    pub warnings: Vec<String>,
}

/// API response for a confirmed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmReceiptResponse {
    pub donation: DonationInfo,
    /// The reconciled parent request, absent if it could not be found.
    pub request: Option<DonationRequestInfo>,
    pub event_id: i64,
    pub message: String,
    pub warnings: Vec<String>,
}

/// One entry of an entity's audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_account_id: i64,
    pub actor_role: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    pub occurred_at: String,
}

/// API response for a donation's audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationHistoryResponse {
    pub donation_id: i64,
    pub events: Vec<AuditEventInfo>,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountInfo {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalInfo {
    pub category_id: i64,
    pub category_name_english: String,
    pub requested: i64,
    pub received: i64,
}

/// API response for the administrator summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReportResponse {
    pub requests_by_status: Vec<StatusCountInfo>,
    pub donations_by_status: Vec<StatusCountInfo>,
    pub category_totals: Vec<CategoryTotalInfo>,
}
