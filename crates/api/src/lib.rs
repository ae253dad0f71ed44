// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the `SchoolAid` platform.
//!
//! This crate sits between the transport layer and the core. It owns
//! authentication, role-based authorization, request and response
//! shapes, error translation and notification delivery. Handlers are
//! synchronous and operate on a borrowed `Persistence`; the caller is
//! responsible for serializing access to it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod notify;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    admin_update_donation, cancel_request, close_request, confirm_receipt, create_donation,
    create_request, ensure_initial_admin, get_donation, get_donation_history, get_request,
    list_all_requests, list_incoming_donations, list_my_donations, list_my_requests,
    list_open_requests, login, logout, register_account, summary_report,
    update_donation_status, whoami,
};
pub use notify::{EmailError, EmailSender, LoggingEmailSender, dispatch_notifications};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AccountInfo, AdminUpdateDonationRequest, AuditEventInfo, CategoryTotalInfo,
    ConfirmReceiptResponse, CreateDonationRequest, CreateDonationRequestRequest,
    DonatedItemInfo, DonatedItemInput, DonationHistoryResponse, DonationInfo,
    DonationRequestInfo, DonationRequestWriteResponse, DonationWriteResponse,
    ListDonationRequestsResponse, ListDonationsResponse, LoginRequest, LoginResponse,
    RegisterAccountRequest, RequestedItemInfo, RequestedItemInput, SchoolInfo,
    StatusCountInfo, SummaryReportResponse, UpdateDonationStatusRequest,
};
