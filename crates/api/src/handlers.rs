// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: load, authorize,
//! apply the core transition, persist the result with its audit event,
//! then dispatch notifications. Validation and state checks fail before
//! anything is written.

use school_aid::{
    ConfirmationResult, DonationCommand, RequestCommand, TransitionResult,
    apply_donation_command, apply_request_command, confirm_receipt as confirm_receipt_transition,
    pledge_donation, submit_request,
};
use school_aid_audit::{AuditEvent, EntityRef};
use school_aid_domain::{
    DonatedItemDraft, Donation, DonationDraft, DonationRequest, RequestPolicy, RequestStatus,
    RequestedItemDraft, TrackingStatus,
};
use school_aid_persistence::{
    AccountData, PersistCreateResult, Persistence, PersistenceError, StatusCount, SummaryReport,
};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::notify::{EmailSender, dispatch_notifications};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AccountInfo, AdminUpdateDonationRequest, AuditEventInfo, CategoryTotalInfo,
    ConfirmReceiptResponse, CreateDonationRequest, CreateDonationRequestRequest,
    DonatedItemInfo, DonationHistoryResponse, DonationInfo, DonationRequestInfo,
    DonationRequestWriteResponse, DonationWriteResponse, ListDonationRequestsResponse,
    ListDonationsResponse, LoginRequest, LoginResponse, RegisterAccountRequest,
    RequestedItemInfo, SchoolInfo, StatusCountInfo, SummaryReportResponse,
    UpdateDonationStatusRequest,
};

// ============================================================================
// Conversions
// ============================================================================

fn format_time(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn account_info(account: &AccountData) -> AccountInfo {
    AccountInfo {
        account_id: account.account_id,
        login_name: account.login_name.clone(),
        display_name: account.display_name.clone(),
        email: account.email.clone(),
        role: account.role.clone(),
    }
}

fn request_info(
    request: &DonationRequest,
    school: Option<SchoolInfo>,
) -> Result<DonationRequestInfo, ApiError> {
    let request_id: i64 = request.request_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Donation request has no ID"),
    })?;

    Ok(DonationRequestInfo {
        request_id,
        school_id: request.school_id,
        school,
        requested_items: request
            .items
            .iter()
            .map(|item| RequestedItemInfo {
                category_id: item.category_id,
                category_name_english: item.category_name_en.clone(),
                category_name_sinhala: item.category_name_si.clone(),
                quantity: item.quantity,
                quantity_received: item.quantity_received,
                remaining: item.remaining(),
            })
            .collect(),
        status: request.status.to_string(),
        notes: request.notes.clone(),
        created_at: format_time(request.created_at)?,
        updated_at: format_time(request.updated_at)?,
    })
}

fn donation_info(donation: &Donation) -> Result<DonationInfo, ApiError> {
    let donation_id: i64 = donation.donation_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Donation has no ID"),
    })?;

    Ok(DonationInfo {
        donation_id,
        donation_request_id: donation.request_id,
        donor_id: donation.donor_id,
        school_id: donation.school_id,
        items_donated: donation
            .items
            .iter()
            .map(|item| DonatedItemInfo {
                category_id: item.category_id,
                category_name_english: item.category_name_en.clone(),
                category_name_sinhala: item.category_name_si.clone(),
                quantity_donated: item.quantity_donated,
            })
            .collect(),
        delivery_method: donation.delivery_method.to_string(),
        donor_address: donation.donor_address.clone(),
        donor_remarks: donation.donor_remarks.clone(),
        tracking_status: donation.tracking_status.to_string(),
        admin_tracking_id: donation.admin_tracking_id.clone(),
        admin_remarks: donation.admin_remarks.clone(),
        school_confirmation: donation.school_confirmation,
        school_confirmation_at: donation
            .school_confirmation_at
            .map(format_time)
            .transpose()?,
        status_last_updated_at: format_time(donation.status_last_updated_at)?,
        created_at: format_time(donation.created_at)?,
    })
}

fn audit_event_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: event.event_id,
        actor_account_id: event.actor.account_id,
        actor_role: event.actor.role.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
        occurred_at: format_time(event.occurred_at)?,
    })
}

fn status_count_infos(counts: &[StatusCount]) -> Vec<StatusCountInfo> {
    counts
        .iter()
        .map(|count| StatusCountInfo {
            status: count.status.clone(),
            count: count.count,
        })
        .collect()
}

fn request_infos(requests: &[DonationRequest]) -> Result<ListDonationRequestsResponse, ApiError> {
    Ok(ListDonationRequestsResponse {
        requests: requests
            .iter()
            .map(|request| request_info(request, None))
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn donation_infos(donations: &[Donation]) -> Result<ListDonationsResponse, ApiError> {
    Ok(ListDonationsResponse {
        donations: donations
            .iter()
            .map(donation_info)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

// ============================================================================
// Loading
// ============================================================================

fn load_request(persistence: &mut Persistence, request_id: i64) -> Result<DonationRequest, ApiError> {
    persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Donation request"),
            message: format!("Donation request {request_id} does not exist"),
        })
}

/// Resolves a submitted request reference to a request id.
///
/// A reference that cannot name any request is reported as not found.
fn request_reference(value: &Value) -> Result<i64, ApiError> {
    let request_id: Option<i64> = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    request_id.ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Donation request"),
        message: format!("{value} does not identify a donation request"),
    })
}

fn load_donation(persistence: &mut Persistence, donation_id: i64) -> Result<Donation, ApiError> {
    persistence
        .get_donation(donation_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Donation"),
            message: format!("Donation {donation_id} does not exist"),
        })
}

fn load_school(persistence: &mut Persistence, school_id: i64) -> Result<Option<SchoolInfo>, ApiError> {
    Ok(persistence
        .get_account_by_id(school_id)
        .map_err(translate_persistence_error)?
        .map(|account| SchoolInfo {
            account_id: account.account_id,
            display_name: account.display_name,
            email: account.email,
        }))
}

// ============================================================================
// Accounts
// ============================================================================

/// Self-registers a School or Donor account.
///
/// # Errors
///
/// Returns an error if:
/// - The role is not `School` or `Donor`
/// - A required field is blank or the email is malformed
/// - The password violates the password policy
/// - The login name is already taken
pub fn register_account(
    persistence: &mut Persistence,
    request: &RegisterAccountRequest,
) -> Result<AccountInfo, ApiError> {
    let role: Role = match request.role.as_str() {
        "School" => Role::School,
        "Donor" => Role::Donor,
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("role"),
                message: format!("Role must be 'School' or 'Donor', got '{other}'"),
            });
        }
    };

    for (field, value) in [
        ("loginName", &request.login_name),
        ("displayName", &request.display_name),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: String::from("Must not be blank"),
            });
        }
    }
    if !request.email.contains('@') {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("Must be a valid email address"),
        });
    }

    PasswordPolicy::default().validate(&request.password, &request.login_name)?;

    let account_id: i64 = persistence
        .create_account(
            &request.login_name,
            &request.display_name,
            &request.email,
            &request.password,
            role.as_str(),
        )
        .map_err(|e| match e {
            PersistenceError::AlreadyExists(_) => ApiError::InvalidInput {
                field: String::from("loginName"),
                message: format!("Login name '{}' is already taken", request.login_name.trim()),
            },
            other => translate_persistence_error(other),
        })?;

    let account: AccountData = persistence
        .get_account_by_id(account_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Account not found after creation"),
        })?;

    info!(account_id, role = %role, "Registered account");
    Ok(account_info(&account))
}

/// Creates the initial administrator unless an administrator already exists.
///
/// # Returns
///
/// The new account ID, or `None` if an administrator already existed.
///
/// # Errors
///
/// Returns an error if the password violates the password policy or
/// the account cannot be stored.
pub fn ensure_initial_admin(
    persistence: &mut Persistence,
    login_name: &str,
    password: &str,
    email: &str,
) -> Result<Option<i64>, ApiError> {
    let admins: i64 = persistence
        .count_accounts_with_role(Role::Admin.as_str())
        .map_err(translate_persistence_error)?;
    if admins > 0 {
        return Ok(None);
    }

    PasswordPolicy::default().validate(password, login_name)?;
    let account_id: i64 = persistence
        .create_account(login_name, "Administrator", email, password, Role::Admin.as_str())
        .map_err(translate_persistence_error)?;

    info!(account_id, "Created initial administrator");
    Ok(Some(account_id))
}

/// Logs in and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the account is disabled.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, actor, expires_at): (String, AuthenticatedActor, String) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    Ok(LoginResponse {
        session_token,
        account: whoami(&actor),
        expires_at,
    })
}

/// Ends a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the authenticated account.
#[must_use]
pub fn whoami(actor: &AuthenticatedActor) -> AccountInfo {
    AccountInfo {
        account_id: actor.account_id,
        login_name: actor.login_name.clone(),
        display_name: actor.display_name.clone(),
        email: actor.email.clone(),
        role: actor.role.to_string(),
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Creates a donation request for the authenticated school.
///
/// # Errors
///
/// Returns an error if the actor is not a school or the item list is invalid.
pub fn create_request(
    persistence: &mut Persistence,
    policy: &RequestPolicy,
    request: &CreateDonationRequestRequest,
    actor: &AuthenticatedActor,
) -> Result<DonationRequestWriteResponse, ApiError> {
    AuthorizationService::authorize_create_request(actor)?;

    let drafts: Vec<RequestedItemDraft> = request
        .requested_items
        .iter()
        .map(|item| RequestedItemDraft {
            category_id: item.category_id,
            category_name_en: item.category_name_english.clone(),
            category_name_si: item.category_name_sinhala.clone(),
            quantity: item.quantity,
        })
        .collect();

    let result: TransitionResult<DonationRequest> = submit_request(
        &drafts,
        request.notes.clone(),
        policy,
        actor.to_audit_actor(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let stored: PersistCreateResult = persistence
        .persist_new_request(&result)
        .map_err(translate_persistence_error)?;

    let mut created: DonationRequest = result.entity;
    created.request_id = Some(stored.entity_id);

    info!(
        request_id = stored.entity_id,
        school_id = actor.account_id,
        "Created donation request"
    );
    Ok(DonationRequestWriteResponse {
        request: request_info(&created, None)?,
        event_id: stored.event_id,
        message: String::from("Donation request created"),
        warnings: result.warnings,
    })
}

/// Lists the authenticated school's requests.
///
/// # Errors
///
/// Returns an error if the actor is not a school.
pub fn list_my_requests(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDonationRequestsResponse, ApiError> {
    AuthorizationService::authorize_list_own_requests(actor)?;
    let requests: Vec<DonationRequest> = persistence
        .list_requests_for_school(actor.account_id)
        .map_err(translate_persistence_error)?;
    request_infos(&requests)
}

/// Lists requests that still accept donations.
///
/// # Errors
///
/// Returns an error if the actor is a school.
pub fn list_open_requests(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDonationRequestsResponse, ApiError> {
    AuthorizationService::authorize_list_open_requests(actor)?;
    let requests: Vec<DonationRequest> = persistence
        .list_open_requests()
        .map_err(translate_persistence_error)?;
    request_infos(&requests)
}

/// Lists every request.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
pub fn list_all_requests(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDonationRequestsResponse, ApiError> {
    AuthorizationService::authorize_list_all_requests(actor)?;
    let requests: Vec<DonationRequest> = persistence
        .list_all_requests()
        .map_err(translate_persistence_error)?;
    request_infos(&requests)
}

/// Returns one request with its owning school.
///
/// # Errors
///
/// Returns an error if the request does not exist or the actor may not view it.
pub fn get_request(
    persistence: &mut Persistence,
    request_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DonationRequestInfo, ApiError> {
    let request: DonationRequest = load_request(persistence, request_id)?;
    AuthorizationService::authorize_view_request(actor, &request)?;
    let school: Option<SchoolInfo> = load_school(persistence, request.school_id)?;
    request_info(&request, school)
}

fn change_request_status(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    request: &DonationRequest,
    command: RequestCommand,
    actor: &AuthenticatedActor,
) -> Result<DonationRequestWriteResponse, ApiError> {
    let result: TransitionResult<DonationRequest> = apply_request_command(
        request,
        command,
        actor.to_audit_actor(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let previous: RequestStatus = request.status;
    let event_id: i64 = persistence
        .persist_request_update(&result, previous)
        .map_err(translate_persistence_error)?;

    let mut warnings: Vec<String> = result.warnings;
    warnings.extend(dispatch_notifications(persistence, sender, &result.notifications));

    info!(
        request_id = ?result.entity.request_id,
        previous_status = %previous,
        new_status = %result.entity.status,
        "Changed donation request status"
    );
    Ok(DonationRequestWriteResponse {
        request: request_info(&result.entity, None)?,
        event_id,
        message: format!("Donation request is now '{}'", result.entity.status),
        warnings,
    })
}

/// Cancels a request on behalf of its owning school.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is not the
/// owning school, or the request is past `Partially Fulfilled`.
pub fn cancel_request(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    request_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DonationRequestWriteResponse, ApiError> {
    let request: DonationRequest = load_request(persistence, request_id)?;
    AuthorizationService::authorize_cancel_request(actor, &request)?;
    change_request_status(persistence, sender, &request, RequestCommand::Cancel, actor)
}

/// Closes a request on behalf of an administrator.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the request
/// does not exist, or it is already closed or cancelled.
pub fn close_request(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    request_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DonationRequestWriteResponse, ApiError> {
    AuthorizationService::authorize_close_request(actor)?;
    let request: DonationRequest = load_request(persistence, request_id)?;
    change_request_status(persistence, sender, &request, RequestCommand::Close, actor)
}

// ============================================================================
// Donations
// ============================================================================

/// Pledges a donation against a request.
///
/// # Errors
///
/// Returns an error if the actor is not a donor, the request does not
/// exist, or the pledge violates a donation rule.
pub fn create_donation(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    request: &CreateDonationRequest,
    actor: &AuthenticatedActor,
) -> Result<DonationWriteResponse, ApiError> {
    AuthorizationService::authorize_create_donation(actor)?;
    let request_id: i64 = request_reference(&request.donation_request_id)?;
    let parent: DonationRequest = load_request(persistence, request_id)?;

    let draft: DonationDraft = DonationDraft {
        items: request
            .items_donated
            .iter()
            .map(|item| DonatedItemDraft {
                category_id: item.category_id,
                category_name_en: item.category_name_english.clone(),
                category_name_si: item.category_name_sinhala.clone(),
                quantity_donated: item.quantity_donated,
            })
            .collect(),
        delivery_method: request.delivery_method.clone(),
        donor_address: request.donor_address.clone(),
        donor_remarks: request.donor_remarks.clone(),
    };

    let result: TransitionResult<Donation> = pledge_donation(
        &parent,
        &draft,
        actor.to_audit_actor(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let stored: PersistCreateResult = persistence
        .persist_new_donation(&result)
        .map_err(translate_persistence_error)?;

    let mut warnings: Vec<String> = result.warnings;
    warnings.extend(dispatch_notifications(persistence, sender, &result.notifications));

    let mut created: Donation = result.entity;
    created.donation_id = Some(stored.entity_id);

    info!(
        donation_id = stored.entity_id,
        request_id,
        donor_id = actor.account_id,
        "Created donation"
    );
    Ok(DonationWriteResponse {
        donation: donation_info(&created)?,
        event_id: stored.event_id,
        message: String::from("Donation pledged"),
        warnings,
    })
}

/// Lists the authenticated donor's donations.
///
/// # Errors
///
/// Returns an error if the actor is not a donor.
pub fn list_my_donations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDonationsResponse, ApiError> {
    AuthorizationService::authorize_list_own_donations(actor)?;
    let donations: Vec<Donation> = persistence
        .list_donations_for_donor(actor.account_id)
        .map_err(translate_persistence_error)?;
    donation_infos(&donations)
}

/// Lists donations made to the authenticated school.
///
/// # Errors
///
/// Returns an error if the actor is not a school.
pub fn list_incoming_donations(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDonationsResponse, ApiError> {
    AuthorizationService::authorize_list_incoming_donations(actor)?;
    let donations: Vec<Donation> = persistence
        .list_donations_for_school(actor.account_id)
        .map_err(translate_persistence_error)?;
    donation_infos(&donations)
}

/// Returns one donation.
///
/// # Errors
///
/// Returns an error if the donation does not exist or the actor may not view it.
pub fn get_donation(
    persistence: &mut Persistence,
    donation_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DonationInfo, ApiError> {
    let donation: Donation = load_donation(persistence, donation_id)?;
    AuthorizationService::authorize_view_donation(actor, &donation)?;
    donation_info(&donation)
}

/// Returns a donation's audit history, oldest first.
///
/// # Errors
///
/// Returns an error if the donation does not exist or the actor may not view it.
pub fn get_donation_history(
    persistence: &mut Persistence,
    donation_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DonationHistoryResponse, ApiError> {
    let donation: Donation = load_donation(persistence, donation_id)?;
    AuthorizationService::authorize_view_donation(actor, &donation)?;

    let events: Vec<AuditEvent> = persistence
        .list_events_for_entity(EntityRef::donation(donation_id))
        .map_err(translate_persistence_error)?;

    Ok(DonationHistoryResponse {
        donation_id,
        events: events
            .iter()
            .map(audit_event_info)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn apply_tracking_update(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    donation: &Donation,
    command: DonationCommand,
    actor: &AuthenticatedActor,
) -> Result<DonationWriteResponse, ApiError> {
    let result: TransitionResult<Donation> = apply_donation_command(
        donation,
        command,
        actor.to_audit_actor(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let previous: TrackingStatus = donation.tracking_status;
    let event_id: i64 = persistence
        .persist_donation_update(&result, previous)
        .map_err(translate_persistence_error)?;

    let mut warnings: Vec<String> = result.warnings;
    warnings.extend(dispatch_notifications(persistence, sender, &result.notifications));

    info!(
        donation_id = ?donation.donation_id,
        previous_status = %previous,
        new_status = %result.entity.tracking_status,
        role = %actor.role,
        "Updated donation tracking"
    );
    Ok(DonationWriteResponse {
        donation: donation_info(&result.entity)?,
        event_id,
        message: format!(
            "Donation status is now '{}'",
            result.entity.tracking_status
        ),
        warnings,
    })
}

/// Applies a donor's status update to a self-delivery donation.
///
/// # Errors
///
/// Returns an error if the donation does not exist, the actor is not its
/// donor, or the transition is not allowed.
pub fn update_donation_status(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    donation_id: i64,
    request: &UpdateDonationStatusRequest,
    actor: &AuthenticatedActor,
) -> Result<DonationWriteResponse, ApiError> {
    let donation: Donation = load_donation(persistence, donation_id)?;
    AuthorizationService::authorize_donor_status_update(actor, &donation)?;
    apply_tracking_update(
        persistence,
        sender,
        &donation,
        DonationCommand::DonorUpdateStatus {
            new_status: request.new_status.clone(),
        },
        actor,
    )
}

/// Applies an administrator's status and tracking update.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the donation
/// does not exist, or the transition is not allowed.
pub fn admin_update_donation(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    donation_id: i64,
    request: &AdminUpdateDonationRequest,
    actor: &AuthenticatedActor,
) -> Result<DonationWriteResponse, ApiError> {
    AuthorizationService::authorize_admin_status_update(actor)?;
    let donation: Donation = load_donation(persistence, donation_id)?;
    apply_tracking_update(
        persistence,
        sender,
        &donation,
        DonationCommand::AdminUpdate {
            new_status: request.new_status.clone(),
            admin_tracking_id: request.admin_tracking_id.clone(),
            admin_remarks: request.admin_remarks.clone(),
        },
        actor,
    )
}

/// Confirms receipt of a donation and reconciles its request.
///
/// # Errors
///
/// Returns an error if the donation does not exist, the actor is not the
/// receiving school, or the donation is already confirmed or cancelled.
pub fn confirm_receipt(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    donation_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ConfirmReceiptResponse, ApiError> {
    let donation: Donation = load_donation(persistence, donation_id)?;
    AuthorizationService::authorize_confirm_receipt(actor, &donation)?;

    let parent: Option<DonationRequest> = persistence
        .get_request(donation.request_id)
        .map_err(translate_persistence_error)?;

    let result: ConfirmationResult = confirm_receipt_transition(
        &donation,
        parent.as_ref(),
        actor.to_audit_actor(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_confirmation(&result)
        .map_err(translate_persistence_error)?;

    let mut warnings: Vec<String> = result.warnings;
    warnings.extend(dispatch_notifications(persistence, sender, &result.notifications));

    info!(
        donation_id,
        request_id = donation.request_id,
        request_status = ?result.request.as_ref().map(|request| request.status),
        "Confirmed donation receipt"
    );
    Ok(ConfirmReceiptResponse {
        donation: donation_info(&result.donation)?,
        request: result
            .request
            .as_ref()
            .map(|request| request_info(request, None))
            .transpose()?,
        event_id,
        message: String::from("Donation receipt confirmed"),
        warnings,
    })
}

// ============================================================================
// Reports
// ============================================================================

/// Builds the administrator summary report.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator.
pub fn summary_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<SummaryReportResponse, ApiError> {
    AuthorizationService::authorize_view_reports(actor)?;
    let report: SummaryReport = persistence
        .summary_report()
        .map_err(translate_persistence_error)?;

    Ok(SummaryReportResponse {
        requests_by_status: status_count_infos(&report.requests_by_status),
        donations_by_status: status_count_infos(&report.donations_by_status),
        category_totals: report
            .category_totals
            .iter()
            .map(|total| CategoryTotalInfo {
                category_id: total.category_id,
                category_name_english: total.category_name_en.clone(),
                requested: total.requested,
                received: total.received,
            })
            .collect(),
    })
}
