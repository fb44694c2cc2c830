// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use hub_access::{OverrideRecord, ScopeError};
use thiserror::Error;
use tokio::sync::RwLock;

/// In-memory store.
///
/// This does not persist data permamently, all changes are lost when the process ends. Use this
/// only in development or test contexts.
///
/// Cloned instances share the same records.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub(crate) overrides: Arc<RwLock<Vec<OverrideRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    /// Override record was refused before it was stored.
    #[error("invalid override scope: {0}")]
    InvalidScope(#[from] ScopeError),
}

// Trait implementations are in the regarding modules, see `overrides`.
