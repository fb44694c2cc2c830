// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::AccessLevel;
use crate::space::PlatformSpace;

/// Access level for every platform space.
///
/// The map is total: every [`PlatformSpace`] has exactly one entry, so callers can render a
/// complete navigation without checking for missing spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "BTreeMap<PlatformSpace, AccessLevel>")
)]
pub struct SpaceAccessMap([AccessLevel; PlatformSpace::COUNT]);

impl SpaceAccessMap {
    pub(crate) fn from_fn(f: impl FnMut(PlatformSpace) -> AccessLevel) -> Self {
        Self(PlatformSpace::ALL.map(f))
    }

    pub(crate) fn uniform(level: AccessLevel) -> Self {
        Self([level; PlatformSpace::COUNT])
    }

    pub fn get(&self, space: PlatformSpace) -> AccessLevel {
        self.0[space.index()]
    }

    /// Spaces with their access level, in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = (PlatformSpace, AccessLevel)> + '_ {
        PlatformSpace::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Spaces which should show up in the navigation of this user.
    pub fn visible(&self) -> impl Iterator<Item = PlatformSpace> + '_ {
        self.iter()
            .filter(|(_, level)| level.is_visible())
            .map(|(space, _)| space)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<SpaceAccessMap> for BTreeMap<PlatformSpace, AccessLevel> {
    fn from(value: SpaceAccessMap) -> Self {
        value.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::AccessLevel;
    use crate::space::PlatformSpace;

    use super::SpaceAccessMap;

    #[test]
    fn visible_spaces() {
        let access = SpaceAccessMap::from_fn(|space| match space {
            PlatformSpace::Dashboard => AccessLevel::View,
            PlatformSpace::Board => AccessLevel::Manage,
            _ => AccessLevel::Invisible,
        });

        assert_eq!(access.len(), PlatformSpace::COUNT);
        assert_eq!(access.get(PlatformSpace::Board), AccessLevel::Manage);
        assert_eq!(access.get(PlatformSpace::Admin), AccessLevel::Invisible);
        assert_eq!(
            access.visible().collect::<Vec<_>>(),
            vec![PlatformSpace::Dashboard, PlatformSpace::Board]
        );

        let map: BTreeMap<_, _> = access.into();
        assert_eq!(map.len(), PlatformSpace::COUNT);
    }
}
