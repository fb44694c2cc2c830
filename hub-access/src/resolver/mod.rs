// SPDX-License-Identifier: MIT OR Apache-2.0

//! Override-aware access resolution.
//!
//! Precedence, from highest to lowest:
//!
//! 1. The privileged role always resolves to `Manage`, the override store is not consulted.
//! 2. An override matching the requested initiative or congress scope exactly.
//! 3. A global override for the user on that space.
//! 4. The static role default, see [`RoleDefaults`].
//!
//! The first matching tier decides; levels of different tiers are never combined.
use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, warn};

use crate::AccessLevel;
use crate::matrix::RoleDefaults;
use crate::overrides::{OverrideRecord, OverrideScope, UserId};
use crate::role::normalize_role;
use crate::space::PlatformSpace;
use crate::space_map::SpaceAccessMap;
use crate::traits::OverrideLookup;


/// Precedence tier which decided a resolved access level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precedence {
    Privileged,
    ScopedOverride,
    GlobalOverride,
    RoleDefault,
}

impl Display for Precedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Precedence::Privileged => "privileged role",
            Precedence::ScopedOverride => "scoped override",
            Precedence::GlobalOverride => "global override",
            Precedence::RoleDefault => "role default",
        };

        write!(f, "{}", s)
    }
}

/// Effective access level together with the tier it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub level: AccessLevel,
    pub source: Precedence,
}

#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The override store could not be queried. This is never treated as "no overrides".
    #[error("override lookup failed: {0}")]
    Lookup(#[source] E),
}

/// Effective access of a user on one space, optionally narrowed to an initiative or congress.
pub async fn resolve_access<L>(
    user_id: &UserId,
    raw_role: Option<&str>,
    space: PlatformSpace,
    scope: Option<&OverrideScope>,
    lookup: &L,
) -> Result<AccessLevel, ResolveError<L::Error>>
where
    L: OverrideLookup,
{
    let resolution = explain_access(user_id, raw_role, space, scope, lookup).await?;
    Ok(resolution.level)
}

/// Same as [`resolve_access`] but also reports which precedence tier decided the level.
pub async fn explain_access<L>(
    user_id: &UserId,
    raw_role: Option<&str>,
    space: PlatformSpace,
    scope: Option<&OverrideScope>,
    lookup: &L,
) -> Result<Resolution, ResolveError<L::Error>>
where
    L: OverrideLookup,
{
    let role = normalize_role(raw_role);
    if role.is_privileged() {
        return Ok(Resolution {
            level: AccessLevel::Manage,
            source: Precedence::Privileged,
        });
    }

    // A global "scope" doesn't narrow anything, it only takes part in the global tier.
    let scope = scope.filter(|scope| !scope.is_global());

    let records = lookup
        .overrides_for_space(user_id, space, scope)
        .await
        .map_err(|err| {
            warn!(%user_id, %space, "override lookup failed: {err}");
            ResolveError::Lookup(err)
        })?;

    let relevant: Vec<&OverrideRecord> = records
        .iter()
        .filter(|record| &record.user_id == user_id && record.space == space)
        .collect();

    let resolution = if let Some(record) = scope.and_then(|scope| {
        first_in_tier(
            relevant.iter().copied().filter(|record| &record.scope == scope),
            Precedence::ScopedOverride,
        )
    }) {
        Resolution {
            level: record.level,
            source: Precedence::ScopedOverride,
        }
    } else if let Some(record) = first_in_tier(
        relevant
            .iter()
            .copied()
            .filter(|record| record.scope.is_global()),
        Precedence::GlobalOverride,
    ) {
        Resolution {
            level: record.level,
            source: Precedence::GlobalOverride,
        }
    } else {
        Resolution {
            level: RoleDefaults::get(role, space),
            source: Precedence::RoleDefault,
        }
    };

    debug!(
        %user_id,
        %role,
        %space,
        level = %resolution.level,
        "access resolved by {}",
        resolution.source
    );

    Ok(resolution)
}

/// Effective access of a user on every space, for building navigation.
///
/// Only global overrides are taken into account, the result contains an entry for every space.
pub async fn resolve_all_spaces<L>(
    user_id: &UserId,
    raw_role: Option<&str>,
    lookup: &L,
) -> Result<SpaceAccessMap, ResolveError<L::Error>>
where
    L: OverrideLookup,
{
    let role = normalize_role(raw_role);
    if role.is_privileged() {
        return Ok(SpaceAccessMap::uniform(AccessLevel::Manage));
    }

    let records = lookup.global_overrides(user_id).await.map_err(|err| {
        warn!(%user_id, "bulk override lookup failed: {err}");
        ResolveError::Lookup(err)
    })?;

    let access = SpaceAccessMap::from_fn(|space| {
        let matching = records.iter().filter(|record| {
            &record.user_id == user_id && record.space == space && record.scope.is_global()
        });

        match first_in_tier(matching, Precedence::GlobalOverride) {
            Some(record) => record.level,
            None => RoleDefaults::get(role, space),
        }
    });

    debug!(%user_id, %role, "resolved access for all spaces");

    Ok(access)
}

/// Picks the first record of a precedence tier, flagging any further ones.
fn first_in_tier<'a>(
    mut records: impl Iterator<Item = &'a OverrideRecord>,
    tier: Precedence,
) -> Option<&'a OverrideRecord> {
    let first = records.next()?;
    let ignored = records.count();
    if ignored > 0 {
        warn!(
            user_id = %first.user_id,
            space = %first.space,
            scope = %first.scope,
            ignored,
            "more than one {tier} matches, using the first one"
        );
    }
    Some(first)
}
