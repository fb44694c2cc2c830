// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::AccessLevel;
use crate::overrides::{OverrideRecord, OverrideScope, UserId};
use crate::space::PlatformSpace;
use crate::traits::OverrideLookup;

/// Administrative interface for creating, changing and removing override records.
///
/// At most one record exists per user, space and scope. Reads through [`OverrideLookup`] are
/// expected to reflect a write as soon as its future resolved.
pub trait OverrideStore: OverrideLookup {
    /// Insert an override or replace the level of the existing one with the same key.
    ///
    /// Returns the previously stored access level, or `None` if the override is new.
    fn set_override(
        &self,
        record: OverrideRecord,
    ) -> impl Future<Output = Result<Option<AccessLevel>, Self::Error>>;

    /// Remove an override, resetting the user to the next lower precedence tier.
    ///
    /// Returns `true` when the removal occurred and `false` when no such override existed.
    fn remove_override(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: &OverrideScope,
    ) -> impl Future<Output = Result<bool, Self::Error>>;

    /// Remove all overrides of a user, returning how many were removed.
    fn remove_user_overrides(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<u64, Self::Error>>;

    /// All override records of a user, of any scope, in insertion order.
    fn user_overrides(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<OverrideRecord>, Self::Error>>;
}
