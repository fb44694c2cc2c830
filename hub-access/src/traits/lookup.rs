// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;

use crate::overrides::{OverrideRecord, OverrideScope, UserId};
use crate::space::PlatformSpace;

/// Read-only access to override records, as consumed by the resolver.
///
/// Implementations must return records in a stable order (for example insertion order), the
/// resolver picks the first record when more than one matches the same precedence tier.
pub trait OverrideLookup {
    type Error: Error;

    /// All override records of a user on one space which are either global or match the given
    /// scope exactly.
    ///
    /// Passing `None` (or a global scope) only returns global records.
    fn overrides_for_space(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: Option<&OverrideScope>,
    ) -> impl Future<Output = Result<Vec<OverrideRecord>, Self::Error>>;

    /// All global override records of a user, across every space.
    fn global_overrides(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<OverrideRecord>, Self::Error>>;
}
