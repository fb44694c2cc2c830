// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layers for access overrides.
//!
//! Both stores implement the read-only [`OverrideLookup`](hub_access::traits::OverrideLookup)
//! interface consumed by the resolver and the administrative
//! [`OverrideStore`](hub_access::traits::OverrideStore) interface used to grant, change and reset
//! overrides.
//!
//! An in-memory `MemoryStore` is gated by the `memory` feature, a SQLite-backed `SqliteStore` by
//! the `sqlite` feature. Both are enabled by default.
#[cfg(feature = "memory")]
pub mod memory;
mod overrides;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "memory")]
pub use memory::{MemoryStore, MemoryStoreError};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteError, SqliteStore, SqliteStoreBuilder};
