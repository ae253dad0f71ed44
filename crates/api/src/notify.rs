// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound notifications.
//!
//! Delivery is best effort: a failed send never fails the operation that
//! produced it. Failures are logged and returned as warnings.

use school_aid::{Notification, Recipient};
use school_aid_persistence::{AccountData, Persistence};
use thiserror::Error;
use tracing::{info, warn};

/// Email delivery errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    /// The recipient address was rejected.
    #[error("Invalid recipient address '{0}'")]
    InvalidRecipient(String),

    /// The transport failed to deliver the message.
    #[error("Email transport failed: {0}")]
    Transport(String),
}

/// Sends email on behalf of the platform.
pub trait EmailSender: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    fn send(&self, to: &str, subject: &str, message: &str) -> Result<(), EmailError>;
}

/// An `EmailSender` that writes each message to the log.
#[derive(Debug, Clone)]
pub struct LoggingEmailSender {
    from: String,
}

impl LoggingEmailSender {
    #[must_use]
    pub const fn new(from: String) -> Self {
        Self { from }
    }
}

impl EmailSender for LoggingEmailSender {
    fn send(&self, to: &str, subject: &str, message: &str) -> Result<(), EmailError> {
        if !to.contains('@') {
            return Err(EmailError::InvalidRecipient(to.to_string()));
        }
        info!(from = %self.from, to, subject, message, "Email sent");
        Ok(())
    }
}

fn recipient_account_id(recipient: Recipient) -> i64 {
    match recipient {
        Recipient::School(id) | Recipient::Donor(id) => id,
    }
}

/// Delivers notifications, returning a warning for each one that failed.
pub fn dispatch_notifications(
    persistence: &mut Persistence,
    sender: &dyn EmailSender,
    notifications: &[Notification],
) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for notification in notifications {
        let account_id: i64 = recipient_account_id(notification.recipient);
        let account: Option<AccountData> = match persistence.get_account_by_id(account_id) {
            Ok(account) => account,
            Err(e) => {
                warn!(account_id, error = %e, "Failed to look up notification recipient");
                None
            }
        };

        let Some(account) = account else {
            warnings.push(format!(
                "Notification '{}' not sent: recipient {account_id} not found",
                notification.subject
            ));
            continue;
        };

        if let Err(e) = sender.send(&account.email, &notification.subject, &notification.message) {
            warn!(account_id, subject = %notification.subject, error = %e, "Email delivery failed");
            warnings.push(format!(
                "Notification '{}' not sent: {e}",
                notification.subject
            ));
        }
    }

    warnings
}
