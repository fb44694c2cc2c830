// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the persistence layer holding override records.
mod lookup;
mod store;

pub use lookup::OverrideLookup;
pub use store::OverrideStore;
