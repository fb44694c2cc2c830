// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access resolution for the platform's functional spaces.
//!
//! Every user holds one [`PlatformRole`] which grants a default [`AccessLevel`] on each
//! [`PlatformSpace`]. Administrators can layer per-user exceptions on top, either for a whole
//! space or narrowed to a single initiative or congress. The resolver combines both into the
//! effective level:
//!
//! ```text
//! raw role ──► normalize_role ──► privileged? ──► scoped override ──► global override ──► default
//! ```
//!
//! Resolution is a policy hint for routing and navigation. The persistence layer remains
//! responsible for enforcing access on writes.
mod access;
pub mod guard;
pub mod matrix;
pub mod overrides;
pub mod resolver;
pub mod role;
pub mod space;
mod space_map;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod traits;

pub use access::{AccessLevel, ParseAccessLevelError, at_least};
pub use guard::{AccessDenied, require};
pub use matrix::{RoleDefaults, resolve_access_from_role};
pub use overrides::{OverrideRecord, OverrideScope, ScopeError, ScopeType, UserId};
pub use resolver::{
    Precedence, Resolution, ResolveError, explain_access, resolve_access, resolve_all_spaces,
};
pub use role::{PlatformRole, normalize_role};
pub use space::{ParseSpaceError, PlatformSpace};
pub use space_map::SpaceAccessMap;
