// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the `SchoolAid` donation platform.
//!
//! Stores accounts, sessions, donation requests, donations and the audit
//! trail in `SQLite` via Diesel. Every lifecycle change is written in one
//! transaction together with its audit event.
//!
//! ## Concurrency
//!
//! Tracking updates and confirmations are conditional writes: the row is
//! only updated if it still holds the value it was read with. A lost race
//! surfaces as [`PersistenceError::Conflict`].
//!
//! Pledge validation reads remaining quantities from the stored counters
//! only. Two donors may pledge against the same remaining quantity; the
//! reconciler caps counters when both are confirmed.
//!
//! ## Testing
//!
//! Tests run against isolated shared in-memory databases, one per
//! [`Persistence::new_in_memory`] call.

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

mod backend;
mod convert;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use diesel::SqliteConnection;
use school_aid::{ConfirmationResult, TransitionResult};
use school_aid_audit::{AuditEvent, EntityRef};
use school_aid_domain::{Donation, DonationRequest, RequestStatus, TrackingStatus};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use backend::PersistenceBackend;

pub use data_models::{AccountData, CategoryTotal, SessionData, StatusCount, SummaryReport};
pub use error::PersistenceError;
pub use mutations::lifecycle::PersistCreateResult;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias kept for callers that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates an adapter over a fresh in-memory database.
    ///
    /// Each call receives its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:school_aid_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates an adapter over a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Lifecycle writes
    // ========================================================================

    /// Stores a newly submitted request and its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_new_request(
        &mut self,
        result: &TransitionResult<DonationRequest>,
    ) -> Result<PersistCreateResult, PersistenceError> {
        mutations::lifecycle::persist_new_request(&mut self.conn, result)
    }

    /// Stores an explicit request status change and its audit event.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the stored status is no longer `previous`.
    pub fn persist_request_update(
        &mut self,
        result: &TransitionResult<DonationRequest>,
        previous: RequestStatus,
    ) -> Result<i64, PersistenceError> {
        mutations::lifecycle::persist_request_update(&mut self.conn, result, previous)
    }

    /// Stores a newly pledged donation and its audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_new_donation(
        &mut self,
        result: &TransitionResult<Donation>,
    ) -> Result<PersistCreateResult, PersistenceError> {
        mutations::lifecycle::persist_new_donation(&mut self.conn, result)
    }

    /// Stores a tracking update and its audit event.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the stored status is no longer `previous`.
    pub fn persist_donation_update(
        &mut self,
        result: &TransitionResult<Donation>,
        previous: TrackingStatus,
    ) -> Result<i64, PersistenceError> {
        mutations::lifecycle::persist_donation_update(&mut self.conn, result, previous)
    }

    /// Stores a confirmation, the reconciled request and the audit event.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the donation was already confirmed.
    pub fn persist_confirmation(
        &mut self,
        result: &ConfirmationResult,
    ) -> Result<i64, PersistenceError> {
        mutations::lifecycle::persist_confirmation(&mut self.conn, result)
    }

    // ========================================================================
    // Requests and donations
    // ========================================================================

    /// Loads a request with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be reconstructed.
    pub fn get_request(
        &mut self,
        request_id: i64,
    ) -> Result<Option<DonationRequest>, PersistenceError> {
        queries::requests::get_request(&mut self.conn, request_id)
    }

    /// Lists a school's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests_for_school(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<DonationRequest>, PersistenceError> {
        queries::requests::list_requests_for_school(&mut self.conn, school_id)
    }

    /// Lists requests still accepting donations, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_open_requests(&mut self) -> Result<Vec<DonationRequest>, PersistenceError> {
        queries::requests::list_open_requests(&mut self.conn)
    }

    /// Lists every request, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_requests(&mut self) -> Result<Vec<DonationRequest>, PersistenceError> {
        queries::requests::list_all_requests(&mut self.conn)
    }

    /// Loads a donation with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be reconstructed.
    pub fn get_donation(&mut self, donation_id: i64) -> Result<Option<Donation>, PersistenceError> {
        queries::donations::get_donation(&mut self.conn, donation_id)
    }

    /// Lists a donor's donations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_donations_for_donor(
        &mut self,
        donor_id: i64,
    ) -> Result<Vec<Donation>, PersistenceError> {
        queries::donations::list_donations_for_donor(&mut self.conn, donor_id)
    }

    /// Lists donations made to a school, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_donations_for_school(
        &mut self,
        school_id: i64,
    ) -> Result<Vec<Donation>, PersistenceError> {
        queries::donations::list_donations_for_school(&mut self.conn, school_id)
    }

    /// Returns the audit history of one entity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn list_events_for_entity(
        &mut self,
        entity: EntityRef,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_events_for_entity(&mut self.conn, entity)
    }

    /// Builds the administrator summary.
    ///
    /// # Errors
    ///
    /// Returns an error if any aggregate query fails.
    pub fn summary_report(&mut self) -> Result<SummaryReport, PersistenceError> {
        queries::reports::summary_report(&mut self.conn)
    }

    // ========================================================================
    // Accounts and sessions
    // ========================================================================

    /// Creates an account with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the login name is taken.
    pub fn create_account(
        &mut self,
        login_name: &str,
        display_name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_account(
            &mut self.conn,
            login_name,
            display_name,
            email,
            password,
            role,
        )
    }

    /// Looks up an account by login name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_login(&mut self.conn, login_name)
    }

    /// Looks up an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_id(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)
    }

    /// Counts accounts holding a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_accounts_with_role(&mut self, role: &str) -> Result<i64, PersistenceError> {
        queries::accounts::count_accounts_with_role(&mut self.conn, role)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(
        &mut self,
        account_id: i64,
        timestamp: &str,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::update_last_login(&mut self.conn, account_id, timestamp)
    }

    /// Creates a login session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        account_id: i64,
        created_at: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_session(
            &mut self.conn,
            session_token,
            account_id,
            created_at,
            expires_at,
        )
    }

    /// Looks up a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::accounts::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes a session's last activity time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        timestamp: &str,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::update_session_activity(&mut self.conn, session_id, timestamp)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::accounts::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_expired_sessions(&mut self.conn, now)
    }
}
