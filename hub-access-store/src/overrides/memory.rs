// SPDX-License-Identifier: MIT OR Apache-2.0

use hub_access::traits::{OverrideLookup, OverrideStore};
use hub_access::{AccessLevel, OverrideRecord, OverrideScope, PlatformSpace, UserId};
use tracing::debug;

use crate::memory::{MemoryStore, MemoryStoreError};

impl OverrideLookup for MemoryStore {
    type Error = MemoryStoreError;

    async fn overrides_for_space(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: Option<&OverrideScope>,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .iter()
            .filter(|record| {
                &record.user_id == user_id
                    && record.space == space
                    && (record.scope.is_global() || Some(&record.scope) == scope)
            })
            .cloned()
            .collect())
    }

    async fn global_overrides(&self, user_id: &UserId) -> Result<Vec<OverrideRecord>, Self::Error> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .iter()
            .filter(|record| &record.user_id == user_id && record.scope.is_global())
            .cloned()
            .collect())
    }
}

impl OverrideStore for MemoryStore {
    async fn set_override(
        &self,
        record: OverrideRecord,
    ) -> Result<Option<AccessLevel>, Self::Error> {
        record.scope.validate()?;

        let mut overrides = self.overrides.write().await;

        debug!(
            user_id = %record.user_id,
            space = %record.space,
            scope = %record.scope,
            level = %record.level,
            "set access override"
        );

        // Replace in place to keep the insertion position.
        match overrides
            .iter_mut()
            .find(|existing| existing.is_keyed_by(&record.user_id, record.space, &record.scope))
        {
            Some(existing) => {
                let previous = existing.level;
                existing.level = record.level;
                Ok(Some(previous))
            }
            None => {
                overrides.push(record);
                Ok(None)
            }
        }
    }

    async fn remove_override(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: &OverrideScope,
    ) -> Result<bool, Self::Error> {
        let mut overrides = self.overrides.write().await;
        let before = overrides.len();
        overrides.retain(|record| !record.is_keyed_by(user_id, space, scope));
        let removed = overrides.len() < before;
        if removed {
            debug!(%user_id, %space, %scope, "removed access override");
        }
        Ok(removed)
    }

    async fn remove_user_overrides(&self, user_id: &UserId) -> Result<u64, Self::Error> {
        let mut overrides = self.overrides.write().await;
        let before = overrides.len();
        overrides.retain(|record| &record.user_id != user_id);
        Ok((before - overrides.len()) as u64)
    }

    async fn user_overrides(&self, user_id: &UserId) -> Result<Vec<OverrideRecord>, Self::Error> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}
