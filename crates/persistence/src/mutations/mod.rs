// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `accounts` — Account and session mutations
//! - `requests` — Request store writes
//! - `donations` — Donation store writes
//! - `audit` — Audit event persistence
//! - `lifecycle` — Transactional persistence of core transition results

pub mod accounts;
pub mod audit;
pub mod donations;
pub mod lifecycle;
pub mod requests;
