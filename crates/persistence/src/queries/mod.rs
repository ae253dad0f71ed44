// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `accounts` — Account and session lookups
//! - `requests` — The request store
//! - `donations` — The donation store
//! - `audit` — Audit history per entity
//! - `reports` — Aggregates for the administrator summary

pub mod accounts;
pub mod audit;
pub mod donations;
pub mod reports;
pub mod requests;
