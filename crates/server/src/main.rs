// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod http;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post, put},
};
use clap::Parser;
use school_aid_api::{EmailSender, LoggingEmailSender, ensure_initial_admin};
use school_aid_domain::{DEFAULT_MINIMUM_QUANTITY, RequestPolicy};
use school_aid_persistence::SqlitePersistence;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::routes::{
    handle_admin_update_donation, handle_cancel_request, handle_close_request,
    handle_confirm_receipt, handle_create_donation, handle_create_request, handle_get_donation,
    handle_get_donation_history, handle_get_request, handle_health, handle_list_all_requests,
    handle_list_incoming_donations, handle_list_my_donations, handle_list_my_requests,
    handle_list_open_requests, handle_login, handle_logout, handle_register,
    handle_summary_report, handle_update_donation_status, handle_whoami,
};

/// `SchoolAid` Server - HTTP server for the school donation platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SCHOOL_AID_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long, env = "SCHOOL_AID_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "SCHOOL_AID_PORT", default_value_t = 3000)]
    port: u16,

    /// Smallest quantity a school may request per category
    #[arg(long, env = "SCHOOL_AID_MINIMUM_QUANTITY", default_value_t = DEFAULT_MINIMUM_QUANTITY)]
    minimum_quantity: u32,

    /// Sender address for notification email
    #[arg(long, env = "SCHOOL_AID_EMAIL_FROM", default_value = "no-reply@schoolaid.lk")]
    email_from: String,

    /// Login name of the administrator created at startup if missing
    #[arg(long, env = "SCHOOL_AID_ADMIN_LOGIN")]
    admin_login: Option<String>,

    /// Password for the administrator created at startup
    #[arg(long, env = "SCHOOL_AID_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

/// Startup configuration errors.
#[derive(Debug, Error)]
enum ConfigError {
    #[error("--minimum-quantity must be at least 1")]
    ZeroMinimumQuantity,

    #[error("--admin-login and --admin-password must be given together")]
    IncompleteAdminCredentials,

    #[error("Failed to create initial administrator: {0}")]
    AdminBootstrap(String),
}

impl Args {
    fn request_policy(&self) -> Result<RequestPolicy, ConfigError> {
        if self.minimum_quantity == 0 {
            return Err(ConfigError::ZeroMinimumQuantity);
        }
        Ok(RequestPolicy {
            minimum_quantity: self.minimum_quantity,
        })
    }

    fn admin_credentials(&self) -> Result<Option<(&str, &str)>, ConfigError> {
        match (&self.admin_login, &self.admin_password) {
            (Some(login), Some(password)) => Ok(Some((login.as_str(), password.as_str()))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompleteAdminCredentials),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer. Handlers hold the lock for a whole operation.
    pub persistence: Arc<Mutex<SqlitePersistence>>,
    /// Outbound notification transport.
    pub email: Arc<dyn EmailSender>,
    /// Rules applied to new requests.
    pub policy: RequestPolicy,
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route(
            "/requests",
            post(handle_create_request).get(handle_list_all_requests),
        )
        .route("/requests/mine", get(handle_list_my_requests))
        .route("/requests/open", get(handle_list_open_requests))
        .route("/requests/{request_id}", get(handle_get_request))
        .route("/requests/{request_id}/cancel", put(handle_cancel_request))
        .route("/requests/{request_id}/close", put(handle_close_request))
        .route("/donations", post(handle_create_donation))
        .route("/donations/mine", get(handle_list_my_donations))
        .route("/donations/incoming", get(handle_list_incoming_donations))
        .route("/donations/{donation_id}", get(handle_get_donation))
        .route(
            "/donations/{donation_id}/history",
            get(handle_get_donation_history),
        )
        .route(
            "/donations/{donation_id}/status",
            put(handle_update_donation_status),
        )
        .route(
            "/donations/{donation_id}/admin-status",
            put(handle_admin_update_donation),
        )
        .route(
            "/donations/{donation_id}/confirm-receipt",
            put(handle_confirm_receipt),
        )
        .route("/reports/summary", get(handle_summary_report))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SchoolAid server");

    let policy: RequestPolicy = args.request_policy()?;

    let mut persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path.display());
        SqlitePersistence::new_with_file(db_path)?
    } else {
        warn!("Using in-memory database; all data is lost on shutdown");
        SqlitePersistence::new_in_memory()?
    };

    if let Some((login_name, password)) = args.admin_credentials()? {
        match ensure_initial_admin(&mut persistence, login_name, password, &args.email_from) {
            Ok(Some(account_id)) => info!(account_id, "Initial administrator created"),
            Ok(None) => info!("An administrator already exists; skipping bootstrap"),
            Err(e) => return Err(ConfigError::AdminBootstrap(e.to_string()).into()),
        }
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        email: Arc::new(LoggingEmailSender::new(args.email_from.clone())),
        policy,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
