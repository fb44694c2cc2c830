// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::overrides::{OverrideRecord, OverrideScope, UserId};
use crate::space::PlatformSpace;
use crate::traits::OverrideLookup;

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Override lookup over a fixed list of records which counts how often it was queried.
///
/// Queries filter like a real store would, records are returned in the order they were given.
#[derive(Clone, Debug, Default)]
pub struct TestLookup {
    records: Vec<OverrideRecord>,
    calls: Arc<AtomicUsize>,
}

impl TestLookup {
    pub fn new(records: Vec<OverrideRecord>) -> Self {
        Self {
            records,
            calls: Arc::default(),
        }
    }

    /// Returns all given records unfiltered, whatever was asked for.
    pub fn unfiltered(records: Vec<OverrideRecord>) -> UnfilteredLookup {
        UnfilteredLookup(records)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OverrideLookup for TestLookup {
    type Error = Infallible;

    async fn overrides_for_space(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: Option<&OverrideScope>,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .iter()
            .filter(|record| {
                &record.user_id == user_id
                    && record.space == space
                    && (record.scope.is_global() || Some(&record.scope) == scope)
            })
            .cloned()
            .collect())
    }

    async fn global_overrides(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .iter()
            .filter(|record| &record.user_id == user_id && record.scope.is_global())
            .cloned()
            .collect())
    }
}

/// Lookup which ignores the query and hands out every record it holds, like a misbehaving store.
#[derive(Clone, Debug)]
pub struct UnfilteredLookup(Vec<OverrideRecord>);

impl OverrideLookup for UnfilteredLookup {
    type Error = Infallible;

    async fn overrides_for_space(
        &self,
        _user_id: &UserId,
        _space: PlatformSpace,
        _scope: Option<&OverrideScope>,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        Ok(self.0.clone())
    }

    async fn global_overrides(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Error)]
#[error("override store unavailable")]
pub struct StoreUnavailable;

/// Lookup which fails on every query.
#[derive(Clone, Debug, Default)]
pub struct FailingLookup;

impl OverrideLookup for FailingLookup {
    type Error = StoreUnavailable;

    async fn overrides_for_space(
        &self,
        _user_id: &UserId,
        _space: PlatformSpace,
        _scope: Option<&OverrideScope>,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        Err(StoreUnavailable)
    }

    async fn global_overrides(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        Err(StoreUnavailable)
    }
}
