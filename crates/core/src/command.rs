// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// An explicit status change on an existing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCommand {
    /// The owning school withdraws the request.
    Cancel,
    /// An administrator closes the request.
    Close,
}

/// A tracking update on an existing donation.
///
/// Status values arrive as their display strings and are parsed when
/// the command is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationCommand {
    /// The donor advances or cancels a self-delivery donation.
    DonorUpdateStatus {
        /// The requested tracking status.
        new_status: String,
    },
    /// An administrator sets the tracking status and tracking details.
    AdminUpdate {
        /// The requested tracking status.
        new_status: String,
        /// `None` leaves the value unchanged, an empty string clears it.
        admin_tracking_id: Option<String>,
        /// `None` leaves the value unchanged, an empty string clears it.
        admin_remarks: Option<String>,
    },
}
