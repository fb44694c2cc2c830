// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::AccessLevel;

/// Reason a route or action was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The space is invisible to the user, callers should behave as if it doesn't exist.
    #[error("not found")]
    NotFound,

    #[error("insufficient permission: requires {required}, has {actual}")]
    Insufficient {
        required: AccessLevel,
        actual: AccessLevel,
    },
}

/// Check a resolved access level against the level a route or action requires.
pub fn require(level: AccessLevel, required: AccessLevel) -> Result<(), AccessDenied> {
    if level.at_least(required) {
        return Ok(());
    }

    match level {
        AccessLevel::Invisible => Err(AccessDenied::NotFound),
        actual => Err(AccessDenied::Insufficient { required, actual }),
    }
}
