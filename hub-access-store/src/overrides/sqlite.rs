// SPDX-License-Identifier: MIT OR Apache-2.0

use hub_access::traits::{OverrideLookup, OverrideStore};
use hub_access::{AccessLevel, OverrideRecord, OverrideScope, PlatformSpace, ScopeType, UserId};
use sqlx::{FromRow, query, query_as};
use tracing::debug;

use crate::sqlite::{DecodeError, SqliteError, SqliteStore};

impl OverrideLookup for SqliteStore {
    type Error = SqliteError;

    async fn overrides_for_space(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: Option<&OverrideScope>,
    ) -> Result<Vec<OverrideRecord>, Self::Error> {
        let scope = scope.filter(|scope| !scope.is_global());

        // Unbound scope parameters are NULL and never match, leaving only global rows.
        let rows = query_as::<_, OverrideRow>(
            "
            SELECT
                user_id,
                space,
                access_level,
                scope_type,
                scope_id
            FROM
                access_overrides_v1
            WHERE
                user_id = ?
                AND space = ?
                AND (
                    scope_type = 'global'
                    OR (scope_type = ? AND scope_id = ?)
                )
            ORDER BY
                id ASC
            ",
        )
        .bind(user_id.as_str())
        .bind(space.as_str())
        .bind(scope.map(|scope| scope.scope_type().as_str()))
        .bind(scope.and_then(|scope| scope.scope_id()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OverrideRecord::try_from).collect()
    }

    async fn global_overrides(&self, user_id: &UserId) -> Result<Vec<OverrideRecord>, Self::Error> {
        let rows = query_as::<_, OverrideRow>(
            "
            SELECT
                user_id,
                space,
                access_level,
                scope_type,
                scope_id
            FROM
                access_overrides_v1
            WHERE
                user_id = ?
                AND scope_type = 'global'
            ORDER BY
                id ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OverrideRecord::try_from).collect()
    }
}

impl OverrideStore for SqliteStore {
    async fn set_override(
        &self,
        record: OverrideRecord,
    ) -> Result<Option<AccessLevel>, Self::Error> {
        record.scope.validate().map_err(SqliteError::InvalidScope)?;

        // Read and write in one transaction. Concurrent writers of the same key are held off by the
        // unique key index, the loser fails with a constraint or busy error.
        let mut tx = self.pool.begin().await?;

        let previous: Option<(String,)> = query_as(
            "
            SELECT
                access_level
            FROM
                access_overrides_v1
            WHERE
                user_id = ?
                AND space = ?
                AND scope_type = ?
                AND IFNULL(scope_id, '') = ?
            ",
        )
        .bind(record.user_id.as_str())
        .bind(record.space.as_str())
        .bind(record.scope.scope_type().as_str())
        .bind(record.scope.scope_id().unwrap_or_default())
        .fetch_optional(&mut *tx)
        .await?;

        match previous {
            Some(_) => {
                query(
                    "
                    UPDATE
                        access_overrides_v1
                    SET
                        access_level = ?
                    WHERE
                        user_id = ?
                        AND space = ?
                        AND scope_type = ?
                        AND IFNULL(scope_id, '') = ?
                    ",
                )
                .bind(record.level.as_str())
                .bind(record.user_id.as_str())
                .bind(record.space.as_str())
                .bind(record.scope.scope_type().as_str())
                .bind(record.scope.scope_id().unwrap_or_default())
                .execute(&mut *tx)
                .await?;
            }
            None => {
                query(
                    "
                    INSERT INTO
                        access_overrides_v1 (
                            user_id,
                            space,
                            access_level,
                            scope_type,
                            scope_id
                        )
                    VALUES
                        (?, ?, ?, ?, ?)
                    ",
                )
                .bind(record.user_id.as_str())
                .bind(record.space.as_str())
                .bind(record.level.as_str())
                .bind(record.scope.scope_type().as_str())
                .bind(record.scope.scope_id())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        debug!(
            user_id = %record.user_id,
            space = %record.space,
            scope = %record.scope,
            level = %record.level,
            "set access override"
        );

        previous
            .map(|(level,)| {
                level.parse::<AccessLevel>().map_err(|err| {
                    SqliteError::Decode("access_level".into(), DecodeError::AccessLevel(err))
                })
            })
            .transpose()
    }

    async fn remove_override(
        &self,
        user_id: &UserId,
        space: PlatformSpace,
        scope: &OverrideScope,
    ) -> Result<bool, Self::Error> {
        let result = query(
            "
            DELETE FROM
                access_overrides_v1
            WHERE
                user_id = ?
                AND space = ?
                AND scope_type = ?
                AND IFNULL(scope_id, '') = ?
            ",
        )
        .bind(user_id.as_str())
        .bind(space.as_str())
        .bind(scope.scope_type().as_str())
        .bind(scope.scope_id().unwrap_or_default())
        .execute(&self.pool)
        .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!(%user_id, %space, %scope, "removed access override");
        }
        Ok(removed)
    }

    async fn remove_user_overrides(&self, user_id: &UserId) -> Result<u64, Self::Error> {
        let result = query(
            "
            DELETE FROM
                access_overrides_v1
            WHERE
                user_id = ?
            ",
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn user_overrides(&self, user_id: &UserId) -> Result<Vec<OverrideRecord>, Self::Error> {
        let rows = query_as::<_, OverrideRow>(
            "
            SELECT
                user_id,
                space,
                access_level,
                scope_type,
                scope_id
            FROM
                access_overrides_v1
            WHERE
                user_id = ?
            ORDER BY
                id ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OverrideRecord::try_from).collect()
    }
}

/// Single override row as it is inserted in the SQLite database.
#[derive(Debug, FromRow)]
struct OverrideRow {
    user_id: String,
    space: String,
    access_level: String,
    scope_type: String,
    scope_id: Option<String>,
}

impl TryFrom<OverrideRow> for OverrideRecord {
    type Error = SqliteError;

    fn try_from(row: OverrideRow) -> Result<Self, Self::Error> {
        let scope_type: ScopeType = row
            .scope_type
            .parse()
            .map_err(|err| SqliteError::Decode("scope_type".into(), DecodeError::Scope(err)))?;

        Ok(OverrideRecord {
            user_id: UserId::from(row.user_id),
            space: row
                .space
                .parse()
                .map_err(|err| SqliteError::Decode("space".into(), DecodeError::Space(err)))?,
            level: row.access_level.parse().map_err(|err| {
                SqliteError::Decode("access_level".into(), DecodeError::AccessLevel(err))
            })?,
            scope: OverrideScope::new(scope_type, row.scope_id)
                .map_err(|err| SqliteError::Decode("scope_id".into(), DecodeError::Scope(err)))?,
        })
    }
}
