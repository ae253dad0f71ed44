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

use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// The account that performed an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Account id of the actor.
    pub account_id: i64,
    /// The actor's role at the time of the action (e.g. "School", "Donor", "Admin").
    pub role: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(account_id: i64, role: String) -> Self {
        Self { account_id, role }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g. "`ConfirmReceipt`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The kind of entity an audit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DonationRequest,
    Donation,
}

impl EntityKind {
    /// Returns the storage name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DonationRequest => "donation_request",
            Self::Donation => "donation",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityKind(pub String);

impl fmt::Display for UnknownEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown audit entity kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donation_request" => Ok(Self::DonationRequest),
            "donation" => Ok(Self::Donation),
            other => Err(UnknownEntityKind(other.to_string())),
        }
    }
}

/// Identifies the entity an audit event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    #[must_use]
    pub const fn request(id: i64) -> Self {
        Self {
            kind: EntityKind::DonationRequest,
            id,
        }
    }

    #[must_use]
    pub const fn donation(id: i64) -> Self {
        Self {
            kind: EntityKind::Donation,
            id,
        }
    }
}

/// A serialized view of an entity at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state, usually JSON.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// A snapshot for an entity that did not exist before the action.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: String::new(),
        }
    }
}

/// An immutable record of one state transition.
///
/// Every successful lifecycle operation produces exactly one audit
/// event. Each event captures:
/// - Who performed the action (actor)
/// - What action was performed (action)
/// - Which entity changed (entity)
/// - The state before and after the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Storage identifier. `None` until persisted.
    pub event_id: Option<i64>,
    pub actor: Actor,
    pub action: Action,
    pub entity: EntityRef,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        entity: EntityRef,
        before: StateSnapshot,
        after: StateSnapshot,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            action,
            entity,
            before,
            after,
            occurred_at,
        }
    }

    /// Returns a copy of this event with its entity id set.
    ///
    /// Used for creation events, whose entity id is only known once the
    /// entity has been stored.
    #[must_use]
    pub const fn with_entity_id(mut self, id: i64) -> Self {
        self.entity.id = id;
        self
    }
}
