// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route handlers.
//!
//! Each handler holds the persistence lock for the whole operation so
//! that the load, the transition and the write see one consistent state.

use axum::{Json, extract::State as AxumState, http::StatusCode};
use school_aid_api::{
    AccountInfo, AdminUpdateDonationRequest, ConfirmReceiptResponse, CreateDonationRequest,
    CreateDonationRequestRequest, DonationHistoryResponse, DonationInfo, DonationRequestInfo,
    DonationRequestWriteResponse, DonationWriteResponse, ListDonationRequestsResponse,
    ListDonationsResponse, LoginRequest, LoginResponse, RegisterAccountRequest,
    SummaryReportResponse, UpdateDonationStatusRequest,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::http::{HttpError, IdPath, JsonBody};
use crate::session::SessionAccount;

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET `/health`
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

// ============================================================================
// Accounts
// ============================================================================

/// POST `/auth/register`
pub async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AccountInfo>), HttpError> {
    info!(login_name = %req.login_name, role = %req.role, "Handling register request");
    let mut persistence = app_state.persistence.lock().await;
    let account: AccountInfo = school_aid_api::register_account(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// POST `/auth/login`
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::login(&mut persistence, &req)?))
}

/// POST `/auth/logout`
pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, token): SessionAccount,
) -> Result<StatusCode, HttpError> {
    info!(account_id = actor.account_id, "Handling logout request");
    let mut persistence = app_state.persistence.lock().await;
    school_aid_api::logout(&mut persistence, &token)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/auth/whoami`
pub async fn handle_whoami(SessionAccount(actor, _): SessionAccount) -> Json<AccountInfo> {
    Json(school_aid_api::whoami(&actor))
}

// ============================================================================
// Requests
// ============================================================================

/// POST `/requests`
pub async fn handle_create_request(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    JsonBody(req): JsonBody<CreateDonationRequestRequest>,
) -> Result<(StatusCode, Json<DonationRequestWriteResponse>), HttpError> {
    info!(
        account_id = actor.account_id,
        items = req.requested_items.len(),
        "Handling create_request request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: DonationRequestWriteResponse =
        school_aid_api::create_request(&mut persistence, &app_state.policy, &req, &actor)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET `/requests/mine`
pub async fn handle_list_my_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<ListDonationRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::list_my_requests(
        &mut persistence,
        &actor,
    )?))
}

/// GET `/requests/open`
pub async fn handle_list_open_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<ListDonationRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::list_open_requests(
        &mut persistence,
        &actor,
    )?))
}

/// GET `/requests`
pub async fn handle_list_all_requests(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<ListDonationRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::list_all_requests(
        &mut persistence,
        &actor,
    )?))
}

/// GET `/requests/{request_id}`
pub async fn handle_get_request(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(request_id): IdPath,
) -> Result<Json<DonationRequestInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::get_request(
        &mut persistence,
        request_id,
        &actor,
    )?))
}

/// PUT `/requests/{request_id}/cancel`
pub async fn handle_cancel_request(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(request_id): IdPath,
) -> Result<Json<DonationRequestWriteResponse>, HttpError> {
    info!(account_id = actor.account_id, request_id, "Handling cancel_request request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::cancel_request(
        &mut persistence,
        app_state.email.as_ref(),
        request_id,
        &actor,
    )?))
}

/// PUT `/requests/{request_id}/close`
pub async fn handle_close_request(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(request_id): IdPath,
) -> Result<Json<DonationRequestWriteResponse>, HttpError> {
    info!(account_id = actor.account_id, request_id, "Handling close_request request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::close_request(
        &mut persistence,
        app_state.email.as_ref(),
        request_id,
        &actor,
    )?))
}

// ============================================================================
// Donations
// ============================================================================

/// POST `/donations`
pub async fn handle_create_donation(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    JsonBody(req): JsonBody<CreateDonationRequest>,
) -> Result<(StatusCode, Json<DonationWriteResponse>), HttpError> {
    info!(
        account_id = actor.account_id,
        request_id = %req.donation_request_id,
        "Handling create_donation request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let response: DonationWriteResponse = school_aid_api::create_donation(
        &mut persistence,
        app_state.email.as_ref(),
        &req,
        &actor,
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET `/donations/mine`
pub async fn handle_list_my_donations(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<ListDonationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::list_my_donations(
        &mut persistence,
        &actor,
    )?))
}

/// GET `/donations/incoming`
pub async fn handle_list_incoming_donations(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<ListDonationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::list_incoming_donations(
        &mut persistence,
        &actor,
    )?))
}

/// GET `/donations/{donation_id}`
pub async fn handle_get_donation(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(donation_id): IdPath,
) -> Result<Json<DonationInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::get_donation(
        &mut persistence,
        donation_id,
        &actor,
    )?))
}

/// GET `/donations/{donation_id}/history`
pub async fn handle_get_donation_history(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(donation_id): IdPath,
) -> Result<Json<DonationHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::get_donation_history(
        &mut persistence,
        donation_id,
        &actor,
    )?))
}

/// PUT `/donations/{donation_id}/status`
pub async fn handle_update_donation_status(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(donation_id): IdPath,
    JsonBody(req): JsonBody<UpdateDonationStatusRequest>,
) -> Result<Json<DonationWriteResponse>, HttpError> {
    info!(
        account_id = actor.account_id,
        donation_id,
        new_status = %req.new_status,
        "Handling update_donation_status request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::update_donation_status(
        &mut persistence,
        app_state.email.as_ref(),
        donation_id,
        &req,
        &actor,
    )?))
}

/// PUT `/donations/{donation_id}/admin-status`
pub async fn handle_admin_update_donation(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(donation_id): IdPath,
    JsonBody(req): JsonBody<AdminUpdateDonationRequest>,
) -> Result<Json<DonationWriteResponse>, HttpError> {
    info!(
        account_id = actor.account_id,
        donation_id,
        new_status = %req.new_status,
        "Handling admin_update_donation request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::admin_update_donation(
        &mut persistence,
        app_state.email.as_ref(),
        donation_id,
        &req,
        &actor,
    )?))
}

/// PUT `/donations/{donation_id}/confirm-receipt`
pub async fn handle_confirm_receipt(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
    IdPath(donation_id): IdPath,
) -> Result<Json<ConfirmReceiptResponse>, HttpError> {
    info!(account_id = actor.account_id, donation_id, "Handling confirm_receipt request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::confirm_receipt(
        &mut persistence,
        app_state.email.as_ref(),
        donation_id,
        &actor,
    )?))
}

// ============================================================================
// Reports
// ============================================================================

/// GET `/reports/summary`
pub async fn handle_summary_report(
    AxumState(app_state): AxumState<AppState>,
    SessionAccount(actor, _): SessionAccount,
) -> Result<Json<SummaryReportResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(school_aid_api::summary_report(
        &mut persistence,
        &actor,
    )?))
}
