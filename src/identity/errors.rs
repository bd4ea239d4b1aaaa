use thiserror::Error;

use crate::identity::types::{AuthProvider, UserId};

/// Business-rule rejections raised by the roster and the session store.
/// A rejected operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Email already in use: {email}")]
    EmailInUse { email: String },

    #[error("No user matches email {email}")]
    UserNotFound { email: String },

    #[error("No user found with {provider} authentication")]
    NoProviderUser { provider: AuthProvider },

    #[error("User {id} is not in the roster")]
    UnknownUser { id: UserId },

    #[error("Duplicate user id in roster: {id}")]
    DuplicateUserId { id: UserId },

    #[error("No user ids left to assign")]
    IdsExhausted,

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Admin privileges required to {action}")]
    PermissionDenied { action: String },
}

impl IdentityError {
    pub fn validation(reason: impl Into<String>) -> Self {
        IdentityError::Validation {
            reason: reason.into(),
        }
    }

    pub fn permission_denied(action: impl Into<String>) -> Self {
        IdentityError::PermissionDenied {
            action: action.into(),
        }
    }
}
