// SPDX-License-Identifier: MIT OR Apache-2.0

//! Administrator-set exceptions to the default access matrix.
use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AccessLevel;
use crate::space::PlatformSpace;

/// Opaque identifier of a platform user.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of entity an override is narrowed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScopeType {
    Global,
    Initiative,
    Congress,
}

impl ScopeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Global => "global",
            ScopeType::Initiative => "initiative",
            ScopeType::Congress => "congress",
        }
    }
}

impl Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = ScopeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "global" => Ok(ScopeType::Global),
            "initiative" => Ok(ScopeType::Initiative),
            "congress" => Ok(ScopeType::Congress),
            _ => Err(ScopeError::UnknownScopeType(value.to_string())),
        }
    }
}

/// Where an override applies: everywhere in a space, or only for one initiative or congress.
///
/// A scoped variant always carries the id of its entity, a global one never does. Scopes built from
/// untrusted parts go through [`OverrideScope::new`]; stores refuse to write scopes which fail
/// [`OverrideScope::validate`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "ScopeParts", into = "ScopeParts")
)]
pub enum OverrideScope {
    Global,
    Initiative(String),
    Congress(String),
}

impl OverrideScope {
    /// Builds a scope from its stored parts, checking that only scoped types carry an id.
    pub fn new(scope_type: ScopeType, scope_id: Option<String>) -> Result<Self, ScopeError> {
        match (scope_type, scope_id) {
            (ScopeType::Global, None) => Ok(OverrideScope::Global),
            (ScopeType::Global, Some(id)) => Err(ScopeError::UnexpectedScopeId(id)),
            (scope_type, None) => Err(ScopeError::MissingScopeId(scope_type)),
            (_, Some(id)) if id.trim().is_empty() => Err(ScopeError::MissingScopeId(scope_type)),
            (ScopeType::Initiative, Some(id)) => Ok(OverrideScope::Initiative(id)),
            (ScopeType::Congress, Some(id)) => Ok(OverrideScope::Congress(id)),
        }
    }

    pub fn initiative(id: impl Into<String>) -> Self {
        OverrideScope::Initiative(id.into())
    }

    pub fn congress(id: impl Into<String>) -> Self {
        OverrideScope::Congress(id.into())
    }

    pub fn scope_type(&self) -> ScopeType {
        match self {
            OverrideScope::Global => ScopeType::Global,
            OverrideScope::Initiative(_) => ScopeType::Initiative,
            OverrideScope::Congress(_) => ScopeType::Congress,
        }
    }

    pub fn scope_id(&self) -> Option<&str> {
        match self {
            OverrideScope::Global => None,
            OverrideScope::Initiative(id) | OverrideScope::Congress(id) => Some(id),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, OverrideScope::Global)
    }

    /// Checks that a scoped variant carries a non-blank entity id.
    pub fn validate(&self) -> Result<(), ScopeError> {
        match self.scope_id() {
            Some(id) if id.trim().is_empty() => Err(ScopeError::MissingScopeId(self.scope_type())),
            _ => Ok(()),
        }
    }
}

impl Display for OverrideScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope_id() {
            Some(id) => write!(f, "{}:{}", self.scope_type(), id),
            None => write!(f, "{}", self.scope_type()),
        }
    }
}

/// Flat representation of a scope as it is persisted: a type plus an optional entity id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScopeParts {
    pub scope_type: ScopeType,
    pub scope_id: Option<String>,
}

impl TryFrom<ScopeParts> for OverrideScope {
    type Error = ScopeError;

    fn try_from(parts: ScopeParts) -> Result<Self, Self::Error> {
        OverrideScope::new(parts.scope_type, parts.scope_id)
    }
}

impl From<OverrideScope> for ScopeParts {
    fn from(scope: OverrideScope) -> Self {
        let scope_type = scope.scope_type();
        let scope_id = match scope {
            OverrideScope::Global => None,
            OverrideScope::Initiative(id) | OverrideScope::Congress(id) => Some(id),
        };
        Self {
            scope_type,
            scope_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("unknown scope type '{0}'")]
    UnknownScopeType(String),

    #[error("{0} scope requires a scope id")]
    MissingScopeId(ScopeType),

    #[error("global scope can't carry scope id '{0}'")]
    UnexpectedScopeId(String),
}

/// An explicit exception to the default access of one user on one space.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverrideRecord {
    pub user_id: UserId,
    pub space: PlatformSpace,
    pub level: AccessLevel,
    pub scope: OverrideScope,
}

impl OverrideRecord {
    pub fn global(user_id: UserId, space: PlatformSpace, level: AccessLevel) -> Self {
        Self {
            user_id,
            space,
            level,
            scope: OverrideScope::Global,
        }
    }

    pub fn scoped(
        user_id: UserId,
        space: PlatformSpace,
        level: AccessLevel,
        scope: OverrideScope,
    ) -> Self {
        Self {
            user_id,
            space,
            level,
            scope,
        }
    }

    /// Returns `true` if this record is the override for exactly this user, space and scope.
    pub fn is_keyed_by(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: &OverrideScope,
    ) -> bool {
        &self.user_id == user_id && self.space == space && &self.scope == scope
    }
}
