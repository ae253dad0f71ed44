// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use school_aid_audit::Actor;
use school_aid_domain::{Donation, DonationRequest};
use school_aid_persistence::{AccountData, Persistence, SessionData};
use std::fmt;
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Schools submit requests and confirm receipt of donations.
    School,
    /// Donors pledge donations and report self-delivery progress.
    Donor,
    /// Administrators oversee every request and donation.
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Donor => "Donor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "School" => Ok(Self::School),
            "Donor" => Ok(Self::Donor),
            "Admin" => Ok(Self::Admin),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {other}"),
            }),
        }
    }
}

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedActor {
    /// Builds an actor from a stored account.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role is not recognised.
    pub fn from_account(account: &AccountData) -> Result<Self, AuthError> {
        Ok(Self {
            account_id: account.account_id,
            login_name: account.login_name.clone(),
            display_name: account.display_name.clone(),
            email: account.email.clone(),
            role: account.role.parse()?,
        })
    }

    /// Converts this actor into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.account_id, self.role.as_str().to_string())
    }
}

fn require_role(actor: &AuthenticatedActor, role: Role, action: &str) -> Result<(), AuthError> {
    if actor.role == role {
        return Ok(());
    }
    Err(AuthError::Unauthorized {
        action: action.to_string(),
        required_role: format!("{role} role"),
    })
}

/// Role and ownership checks for every operation.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only schools may submit requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a school.
    pub fn authorize_create_request(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::School, "create_request")
    }

    /// Only schools may list their own requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a school.
    pub fn authorize_list_own_requests(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::School, "list_own_requests")
    }

    /// Donors and administrators may browse open requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a school.
    pub fn authorize_list_open_requests(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Donor | Role::Admin => Ok(()),
            Role::School => Err(AuthError::Unauthorized {
                action: String::from("list_open_requests"),
                required_role: String::from("Donor or Admin role"),
            }),
        }
    }

    /// Only administrators may list every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_list_all_requests(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, "list_all_requests")
    }

    /// The owning school and administrators may view a request.
    ///
    /// # Errors
    ///
    /// Returns an error for any other actor.
    pub fn authorize_view_request(
        actor: &AuthenticatedActor,
        request: &DonationRequest,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::School if request.school_id == actor.account_id => Ok(()),
            _ => Err(AuthError::Unauthorized {
                action: String::from("view_request"),
                required_role: String::from("owning School or Admin role"),
            }),
        }
    }

    /// Only the owning school may cancel a request.
    ///
    /// # Errors
    ///
    /// Returns an error for any other actor.
    pub fn authorize_cancel_request(
        actor: &AuthenticatedActor,
        request: &DonationRequest,
    ) -> Result<(), AuthError> {
        if actor.role == Role::School && request.school_id == actor.account_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("cancel_request"),
            required_role: String::from("owning School role"),
        })
    }

    /// Only administrators may close a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_close_request(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, "close_request")
    }

    /// Only donors may pledge donations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a donor.
    pub fn authorize_create_donation(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Donor, "create_donation")
    }

    /// Only donors may list their own donations.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a donor.
    pub fn authorize_list_own_donations(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Donor, "list_own_donations")
    }

    /// Only schools may list donations made to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a school.
    pub fn authorize_list_incoming_donations(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::School, "list_incoming_donations")
    }

    /// The donor, the receiving school and administrators may view a donation.
    ///
    /// # Errors
    ///
    /// Returns an error for any other actor.
    pub fn authorize_view_donation(
        actor: &AuthenticatedActor,
        donation: &Donation,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Donor if donation.donor_id == actor.account_id => Ok(()),
            Role::School if donation.school_id == actor.account_id => Ok(()),
            _ => Err(AuthError::Unauthorized {
                action: String::from("view_donation"),
                required_role: String::from("owning Donor, receiving School or Admin role"),
            }),
        }
    }

    /// Only the pledging donor may report donor status updates.
    ///
    /// # Errors
    ///
    /// Returns an error for any other actor.
    pub fn authorize_donor_status_update(
        actor: &AuthenticatedActor,
        donation: &Donation,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Donor && donation.donor_id == actor.account_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("update_donation_status"),
            required_role: String::from("owning Donor role"),
        })
    }

    /// Only administrators may use the administrator status update.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_admin_status_update(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, "admin_update_donation")
    }

    /// Only the receiving school may confirm receipt.
    ///
    /// # Errors
    ///
    /// Returns an error for any other actor.
    pub fn authorize_confirm_receipt(
        actor: &AuthenticatedActor,
        donation: &Donation,
    ) -> Result<(), AuthError> {
        if actor.role == Role::School && donation.school_id == actor.account_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("confirm_receipt"),
            required_role: String::from("receiving School role"),
        })
    }

    /// Only administrators may view reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an administrator.
    pub fn authorize_view_reports(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, "view_reports")
    }
}

/// Session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a session stays valid after login.
    pub const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    fn format_time(value: OffsetDateTime) -> Result<String, AuthError> {
        value
            .format(&Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format time: {e}"),
            })
    }

    fn storage_failure(context: &str, err: &dyn std::error::Error) -> AuthError {
        warn!(error = %err, "{context}");
        AuthError::AuthenticationFailed {
            reason: format!("{context}: {err}"),
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Returns
    ///
    /// The session token, the authenticated actor and the session expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the login is unknown, the password is wrong,
    /// the account is disabled, or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor, String), AuthError> {
        let invalid = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid login name or password"),
        };

        let account: AccountData = persistence
            .get_account_by_login(login_name)
            .map_err(|e| Self::storage_failure("Failed to look up account", &e))?
            .ok_or_else(invalid)?;

        let password_ok: bool = bcrypt::verify(password, &account.password_hash).unwrap_or(false);
        if !password_ok {
            debug!(login_name = %account.login_name, "Password verification failed");
            return Err(invalid());
        }

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let actor: AuthenticatedActor = AuthenticatedActor::from_account(&account)?;
        let session_token: String = Self::generate_session_token();
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let created_at: String = Self::format_time(now)?;
        let expires_at: String = Self::format_time(now + Self::DEFAULT_SESSION_EXPIRATION)?;

        persistence
            .delete_expired_sessions(&created_at)
            .map_err(|e| Self::storage_failure("Failed to purge expired sessions", &e))?;

        persistence
            .create_session(&session_token, account.account_id, &created_at, &expires_at)
            .map_err(|e| Self::storage_failure("Failed to create session", &e))?;
        persistence
            .update_last_login(account.account_id, &created_at)
            .map_err(|e| Self::storage_failure("Failed to update last login", &e))?;

        info!(account_id = account.account_id, role = %actor.role, "Login succeeded");
        Ok((session_token, actor, expires_at))
    }

    /// Resolves a session token to its account.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired, or the
    /// account is missing or disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| Self::storage_failure("Failed to look up session", &e))?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        if now > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(|e| Self::storage_failure("Failed to look up account", &e))?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        persistence
            .update_session_activity(session.session_id, &Self::format_time(now)?)
            .map_err(|e| Self::storage_failure("Failed to update session activity", &e))?;

        AuthenticatedActor::from_account(&account)
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| Self::storage_failure("Failed to delete session", &e))
    }

    /// Generates a random 256-bit session token.
    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }
}
