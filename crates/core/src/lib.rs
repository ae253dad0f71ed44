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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{
    apply_donation_command, apply_request_command, confirm_receipt, pledge_donation,
    submit_request,
};
pub use command::{DonationCommand, RequestCommand};
pub use error::CoreError;
pub use state::{
    ConfirmationResult, Notification, Recipient, TransitionResult, donation_snapshot,
    request_snapshot,
};
