// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static role × space default access policy.
//!
//! The table below is the baseline every resolution falls back to. It is compiled into the binary
//! and never mutated; changing a default is a deployment.
//!
//! Rows are indexed by [`PlatformRole`] in declaration order, columns by [`PlatformSpace`] in
//! declaration order (see [`PlatformSpace::ALL`]). The privileged role has no row, it resolves to
//! `Manage` before the table is consulted.
use crate::AccessLevel::{self, Edit as E, Invisible as I, Manage as M, View as V};
use crate::role::{PlatformRole, normalize_role};
use crate::space::PlatformSpace;

type Row = [AccessLevel; PlatformSpace::COUNT];

#[rustfmt::skip]
const ROLE_SPACE_DEFAULTS: [Row; 7] = [
    //  dash init task cong stor reso part netw boar bure noti prof admin
    [   V,   E,   E,   V,   E,   V,   V,   V,   I,   I,   V,   E,   I ], // PatientAdvocate
    [   V,   E,   E,   V,   V,   E,   V,   V,   I,   I,   V,   E,   I ], // Clinician
    [   V,   E,   E,   V,   V,   E,   V,   V,   I,   I,   V,   E,   I ], // Researcher
    [   V,   M,   M,   E,   M,   M,   V,   E,   I,   I,   V,   E,   I ], // Moderator
    [   V,   M,   M,   M,   E,   E,   E,   M,   V,   E,   V,   E,   I ], // HubCoordinator
    [   V,   V,   I,   V,   I,   V,   E,   I,   I,   I,   V,   E,   I ], // IndustryPartner
    [   V,   V,   V,   V,   V,   V,   V,   V,   M,   E,   V,   E,   I ], // BoardMember
];

/// Read-only view over the default policy table.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleDefaults;

impl RoleDefaults {
    /// Default access of `role` on `space`.
    ///
    /// The privileged role yields `Manage` without looking at the table. A missing cell fails
    /// closed to `Invisible`.
    pub fn get(role: PlatformRole, space: PlatformSpace) -> AccessLevel {
        if role.is_privileged() {
            return AccessLevel::Manage;
        }

        Self::lookup(role, space).unwrap_or(AccessLevel::Invisible)
    }

    /// Default access of `role` on every space, in navigation order.
    pub fn row(role: PlatformRole) -> Row {
        PlatformSpace::ALL.map(|space| Self::get(role, space))
    }

    fn lookup(role: PlatformRole, space: PlatformSpace) -> Option<AccessLevel> {
        ROLE_SPACE_DEFAULTS
            .get(role as usize)
            .and_then(|row| row.get(space.index()))
            .copied()
    }
}

/// Default access for a raw, not yet normalized role string on the given space.
///
/// Pure and synchronous, safe to call from routing guards or while building UI.
pub fn resolve_access_from_role(raw_role: Option<&str>, space: PlatformSpace) -> AccessLevel {
    RoleDefaults::get(normalize_role(raw_role), space)
}
