// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Functional area of the platform to which access is controlled independently.
///
/// Adding a space requires extending the default matrix for every role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlatformSpace {
    Dashboard,
    Initiatives,
    Tasks,
    Congress,
    Stories,
    Resources,
    Partners,
    Network,
    Board,
    Bureau,
    Notifications,
    Profile,
    Admin,
}

impl PlatformSpace {
    pub const COUNT: usize = 13;

    /// All spaces in navigation order.
    pub const ALL: [PlatformSpace; Self::COUNT] = [
        PlatformSpace::Dashboard,
        PlatformSpace::Initiatives,
        PlatformSpace::Tasks,
        PlatformSpace::Congress,
        PlatformSpace::Stories,
        PlatformSpace::Resources,
        PlatformSpace::Partners,
        PlatformSpace::Network,
        PlatformSpace::Board,
        PlatformSpace::Bureau,
        PlatformSpace::Notifications,
        PlatformSpace::Profile,
        PlatformSpace::Admin,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PlatformSpace::Dashboard => "dashboard",
            PlatformSpace::Initiatives => "initiatives",
            PlatformSpace::Tasks => "tasks",
            PlatformSpace::Congress => "congress",
            PlatformSpace::Stories => "stories",
            PlatformSpace::Resources => "resources",
            PlatformSpace::Partners => "partners",
            PlatformSpace::Network => "network",
            PlatformSpace::Board => "board",
            PlatformSpace::Bureau => "bureau",
            PlatformSpace::Notifications => "notifications",
            PlatformSpace::Profile => "profile",
            PlatformSpace::Admin => "admin",
        }
    }

    /// Position of this space in [`PlatformSpace::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Display for PlatformSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlatformSpace {
    type Err = ParseSpaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|space| space.as_str() == value)
            .ok_or_else(|| ParseSpaceError(value.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown platform space '{0}'")]
pub struct ParseSpaceError(pub String);
