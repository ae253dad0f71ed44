// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use school_aid::CoreError;
use school_aid_domain::{DomainError, ItemList};
use school_aid_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These form the API contract; domain, core and persistence errors are
/// translated into them explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, invalid or expired credentials.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor is authenticated but may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role or relationship required for this action.
        required_role: String,
    },
    /// The input is malformed or violates a validation rule.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The action is not allowed in the entity's current state.
    InvalidState {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState { message } => write!(f, "{message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("password"),
            message: err.to_string(),
        }
    }
}

/// Names the request field a validation error refers to.
fn field_for(err: &DomainError) -> String {
    match err {
        DomainError::EmptyItemList(list) => list.field_name().to_string(),
        DomainError::MissingItemField { list, index, field }
        | DomainError::NotWholeNumber { list, index, field } => {
            format!("{}[{index}].{field}", list.field_name())
        }
        DomainError::QuantityBelowMinimum { .. } => String::from("requestedItems.quantity"),
        DomainError::QuantityAboveMaximum { list, .. } => match list {
            ItemList::Requested => String::from("requestedItems.quantity"),
            ItemList::Donated => String::from("itemsDonated.quantityDonated"),
        },
        DomainError::QuantityNotPositive { .. } | DomainError::ExceedsRemaining { .. } => {
            String::from("itemsDonated")
        }
        DomainError::DuplicateCategory { list, .. } => format!("{}.categoryId", list.field_name()),
        DomainError::InvalidDeliveryMethod(_) => String::from("deliveryMethod"),
        DomainError::MissingDonorAddress => String::from("donorAddress"),
        DomainError::InvalidTrackingStatus(_) => String::from("newStatus"),
        DomainError::InvalidRequestStatus(_) => String::from("status"),
        _ => String::new(),
    }
}

/// Translates a domain error into an API error.
///
/// Lifecycle violations become `InvalidState`; everything else is input.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    if err.is_state_violation() {
        return ApiError::InvalidState {
            message: err.to_string(),
        };
    }
    ApiError::InvalidInput {
        field: field_for(&err),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotPersisted(entity) => {
            error!(entity, "Core transition received an unsaved entity");
            ApiError::Internal {
                message: format!("{entity} has not been stored"),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// A lost conditional write means the entity changed state under the
/// caller, so it is reported as a state conflict.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Conflict(message) => ApiError::InvalidState { message },
        PersistenceError::AlreadyExists(message) => ApiError::InvalidInput {
            field: String::new(),
            message: format!("Already exists: {message}"),
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
