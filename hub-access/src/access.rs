// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four access levels a user can hold on a platform space. Greater access levels are assumed
/// to also contain all lower ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AccessLevel {
    /// The space is hidden from the user.
    Invisible = 0,

    /// Permission to look at the contents of a space.
    View = 1,

    /// Permission to create and change contents of a space.
    Edit = 2,

    /// Permission to administer a space, including other people's contents.
    Manage = 3,
}

impl AccessLevel {
    /// All access levels in ascending order.
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Invisible,
        AccessLevel::View,
        AccessLevel::Edit,
        AccessLevel::Manage,
    ];

    /// Ordinal of this level, `0` for `Invisible` up to `3` for `Manage`.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Access level for the given ordinal.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Returns `true` if this level grants at least the `minimum` level.
    ///
    /// Every gated action or UI element should ask for the level it requires through this method.
    pub const fn at_least(self, minimum: AccessLevel) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Access level is anything but `Invisible`.
    pub const fn is_visible(self) -> bool {
        self.at_least(AccessLevel::View)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Invisible => "invisible",
            AccessLevel::View => "view",
            AccessLevel::Edit => "edit",
            AccessLevel::Manage => "manage",
        }
    }
}

/// Returns `rank(level) >= rank(minimum)`.
pub const fn at_least(level: AccessLevel, minimum: AccessLevel) -> bool {
    level.at_least(minimum)
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| ParseAccessLevelError(value.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown access level '{0}'")]
pub struct ParseAccessLevelError(pub String);

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{AccessLevel, at_least};

    #[test]
    fn ranks_are_strictly_increasing() {
        assert_eq!(AccessLevel::Invisible.rank(), 0);
        assert_eq!(AccessLevel::View.rank(), 1);
        assert_eq!(AccessLevel::Edit.rank(), 2);
        assert_eq!(AccessLevel::Manage.rank(), 3);

        for pair in AccessLevel::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn at_least_boundaries() {
        assert!(at_least(AccessLevel::Manage, AccessLevel::Invisible));
        assert!(!at_least(AccessLevel::Invisible, AccessLevel::View));
        assert!(AccessLevel::Edit.at_least(AccessLevel::View));
        assert!(!AccessLevel::View.at_least(AccessLevel::Edit));
    }

    #[rstest]
    #[case(AccessLevel::Invisible)]
    #[case(AccessLevel::View)]
    #[case(AccessLevel::Edit)]
    #[case(AccessLevel::Manage)]
    fn at_least_is_reflexive(#[case] level: AccessLevel) {
        assert!(at_least(level, level));
    }

    #[test]
    fn rank_lookup() {
        assert_eq!(AccessLevel::from_rank(2), Some(AccessLevel::Edit));
        assert_eq!(AccessLevel::from_rank(4), None);
        assert!(!AccessLevel::Invisible.is_visible());
        assert!(AccessLevel::View.is_visible());
    }

    #[test]
    fn parse_levels() {
        assert_eq!("manage".parse::<AccessLevel>(), Ok(AccessLevel::Manage));
        assert_eq!("invisible".parse::<AccessLevel>(), Ok(AccessLevel::Invisible));
        assert!("Manage".parse::<AccessLevel>().is_err());
        assert!("owner".parse::<AccessLevel>().is_err());
        assert_eq!(AccessLevel::Edit.to_string(), "edit");
    }

    fn any_level() -> impl Strategy<Value = AccessLevel> {
        prop::sample::select(AccessLevel::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn total_order(a in any_level(), b in any_level()) {
            // At least one direction always holds, both only when equal.
            prop_assert!(at_least(a, b) || at_least(b, a));
            prop_assert_eq!(at_least(a, b) && at_least(b, a), a == b);
        }

        #[test]
        fn transitive(a in any_level(), b in any_level(), c in any_level()) {
            if at_least(a, b) && at_least(b, c) {
                prop_assert!(at_least(a, c));
            }
        }
    }
}
