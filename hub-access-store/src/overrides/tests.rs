// SPDX-License-Identifier: MIT OR Apache-2.0

use hub_access::test_utils::setup_logging;
use hub_access::traits::{OverrideLookup, OverrideStore};
use hub_access::{
    AccessLevel, OverrideRecord, OverrideScope, PlatformSpace, ScopeError, ScopeType, UserId,
    resolve_access, resolve_all_spaces,
};
use sqlx::query;

use crate::memory::{MemoryStore, MemoryStoreError};
use crate::sqlite::{SqliteError, SqliteStore};

fn alice() -> UserId {
    UserId::new("alice")
}

fn bob() -> UserId {
    UserId::new("bob")
}

async fn set_get_remove_overrides<S>(store: S)
where
    S: OverrideStore,
{
    let init_42 = OverrideScope::initiative("init-42");
    let congress_123 = OverrideScope::congress("congress-123");

    // Set
    // ~~~

    assert_eq!(
        store
            .set_override(OverrideRecord::global(
                alice(),
                PlatformSpace::Initiatives,
                AccessLevel::View
            ))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        store
            .set_override(OverrideRecord::scoped(
                alice(),
                PlatformSpace::Initiatives,
                AccessLevel::Manage,
                init_42.clone(),
            ))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        store
            .set_override(OverrideRecord::scoped(
                alice(),
                PlatformSpace::Congress,
                AccessLevel::Edit,
                congress_123.clone(),
            ))
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        store
            .set_override(OverrideRecord::global(
                bob(),
                PlatformSpace::Board,
                AccessLevel::Manage
            ))
            .await
            .unwrap(),
        None
    );

    // Setting the same key again replaces the level and returns the previous one.
    assert_eq!(
        store
            .set_override(OverrideRecord::global(
                alice(),
                PlatformSpace::Initiatives,
                AccessLevel::Invisible
            ))
            .await
            .unwrap(),
        Some(AccessLevel::View)
    );

    // Query
    // ~~~~~

    // Unscoped queries only see global records.
    assert_eq!(
        store
            .overrides_for_space(&alice(), PlatformSpace::Initiatives, None)
            .await
            .unwrap(),
        vec![OverrideRecord::global(
            alice(),
            PlatformSpace::Initiatives,
            AccessLevel::Invisible
        )]
    );
    assert_eq!(
        store
            .overrides_for_space(
                &alice(),
                PlatformSpace::Initiatives,
                Some(&OverrideScope::Global)
            )
            .await
            .unwrap()
            .len(),
        1
    );

    // Scoped queries see global records and the exactly matching scoped one, in insertion order.
    assert_eq!(
        store
            .overrides_for_space(&alice(), PlatformSpace::Initiatives, Some(&init_42))
            .await
            .unwrap(),
        vec![
            OverrideRecord::global(alice(), PlatformSpace::Initiatives, AccessLevel::Invisible),
            OverrideRecord::scoped(
                alice(),
                PlatformSpace::Initiatives,
                AccessLevel::Manage,
                init_42.clone()
            ),
        ]
    );
    assert!(
        store
            .overrides_for_space(
                &alice(),
                PlatformSpace::Initiatives,
                Some(&OverrideScope::initiative("init-99"))
            )
            .await
            .unwrap()
            .iter()
            .all(|record| record.scope.is_global())
    );

    // Bulk query contains global records of this user only.
    assert_eq!(
        store.global_overrides(&alice()).await.unwrap(),
        vec![OverrideRecord::global(
            alice(),
            PlatformSpace::Initiatives,
            AccessLevel::Invisible
        )]
    );
    assert_eq!(store.user_overrides(&alice()).await.unwrap().len(), 3);

    // Remove
    // ~~~~~~

    assert!(
        store
            .remove_override(&alice(), PlatformSpace::Initiatives, &init_42)
            .await
            .unwrap()
    );
    // Removing the same override again returns false.
    assert!(
        !store
            .remove_override(&alice(), PlatformSpace::Initiatives, &init_42)
            .await
            .unwrap()
    );
    // Scope type has to match as well.
    assert!(
        !store
            .remove_override(
                &alice(),
                PlatformSpace::Congress,
                &OverrideScope::initiative("congress-123")
            )
            .await
            .unwrap()
    );

    assert_eq!(store.remove_user_overrides(&alice()).await.unwrap(), 2);
    assert!(store.user_overrides(&alice()).await.unwrap().is_empty());
    assert_eq!(store.user_overrides(&bob()).await.unwrap().len(), 1);
}

async fn resolve_through_store<S>(store: S)
where
    S: OverrideStore,
{
    setup_logging();

    let role = Some("PatientAdvocate");
    let space = PlatformSpace::Initiatives;
    let init_42 = OverrideScope::initiative("init-42");
    let init_99 = OverrideScope::initiative("init-99");

    let level = resolve_access(&alice(), role, space, None, &store).await.unwrap();
    assert_eq!(level, AccessLevel::Edit);

    store
        .set_override(OverrideRecord::global(alice(), space, AccessLevel::View))
        .await
        .unwrap();
    let level = resolve_access(&alice(), role, space, None, &store).await.unwrap();
    assert_eq!(level, AccessLevel::View);

    store
        .set_override(OverrideRecord::scoped(
            alice(),
            space,
            AccessLevel::Manage,
            init_42.clone(),
        ))
        .await
        .unwrap();
    let level = resolve_access(&alice(), role, space, Some(&init_42), &store)
        .await
        .unwrap();
    assert_eq!(level, AccessLevel::Manage);
    let level = resolve_access(&alice(), role, space, Some(&init_99), &store)
        .await
        .unwrap();
    assert_eq!(level, AccessLevel::View);

    let all = resolve_all_spaces(&alice(), role, &store).await.unwrap();
    assert_eq!(all.get(space), AccessLevel::View);
    assert_eq!(all.get(PlatformSpace::Admin), AccessLevel::Invisible);

    // Resetting the global override brings back the role default.
    store
        .remove_override(&alice(), space, &OverrideScope::Global)
        .await
        .unwrap();
    let level = resolve_access(&alice(), role, space, Some(&init_99), &store)
        .await
        .unwrap();
    assert_eq!(level, AccessLevel::Edit);
}

async fn refuse_blank_scope_ids<S>(store: S)
where
    S: OverrideStore,
{
    let space = PlatformSpace::Initiatives;

    for scope in [OverrideScope::initiative(""), OverrideScope::congress("  ")] {
        assert!(
            store
                .set_override(OverrideRecord::scoped(
                    alice(),
                    space,
                    AccessLevel::Manage,
                    scope.clone()
                ))
                .await
                .is_err()
        );

        // Nothing was written, the user's overrides stay readable.
        assert!(store.user_overrides(&alice()).await.unwrap().is_empty());
        let level = resolve_access(&alice(), Some("PatientAdvocate"), space, Some(&scope), &store)
            .await
            .unwrap();
        assert_eq!(level, AccessLevel::Edit);
    }

    // Valid overrides of the same user are still accepted afterwards.
    store
        .set_override(OverrideRecord::global(alice(), space, AccessLevel::View))
        .await
        .unwrap();
    assert_eq!(store.user_overrides(&alice()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_get_remove_overrides_memory() {
    set_get_remove_overrides(MemoryStore::new()).await;
}

#[tokio::test]
async fn set_get_remove_overrides_sqlite() {
    set_get_remove_overrides(SqliteStore::temporary().await).await;
}

#[tokio::test]
async fn resolve_through_store_memory() {
    resolve_through_store(MemoryStore::new()).await;
}

#[tokio::test]
async fn resolve_through_store_sqlite() {
    resolve_through_store(SqliteStore::temporary().await).await;
}

#[tokio::test]
async fn refuse_blank_scope_ids_memory() {
    refuse_blank_scope_ids(MemoryStore::new()).await;

    let result = MemoryStore::new()
        .set_override(OverrideRecord::scoped(
            alice(),
            PlatformSpace::Congress,
            AccessLevel::View,
            OverrideScope::congress(""),
        ))
        .await;
    assert!(matches!(
        result,
        Err(MemoryStoreError::InvalidScope(ScopeError::MissingScopeId(
            ScopeType::Congress
        )))
    ));
}

#[tokio::test]
async fn refuse_blank_scope_ids_sqlite() {
    refuse_blank_scope_ids(SqliteStore::temporary().await).await;

    let result = SqliteStore::temporary()
        .await
        .set_override(OverrideRecord::scoped(
            alice(),
            PlatformSpace::Initiatives,
            AccessLevel::View,
            OverrideScope::initiative(""),
        ))
        .await;
    assert!(matches!(
        result,
        Err(SqliteError::InvalidScope(ScopeError::MissingScopeId(
            ScopeType::Initiative
        )))
    ));
}

#[tokio::test]
async fn memory_store_clones_share_records() {
    let store = MemoryStore::new();
    let clone = store.clone();

    store
        .set_override(OverrideRecord::global(
            alice(),
            PlatformSpace::Tasks,
            AccessLevel::Manage,
        ))
        .await
        .unwrap();
    assert_eq!(clone.global_overrides(&alice()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn sqlite_rejects_scope_invariant_violations() {
    let store = SqliteStore::temporary().await;

    // Scoped row without id.
    let result = query(
        "
        INSERT INTO
            access_overrides_v1 (user_id, space, access_level, scope_type, scope_id)
        VALUES
            ('alice', 'congress', 'manage', 'congress', NULL)
        ",
    )
    .execute(store.pool())
    .await;
    assert!(result.is_err());

    // Global row with id.
    let result = query(
        "
        INSERT INTO
            access_overrides_v1 (user_id, space, access_level, scope_type, scope_id)
        VALUES
            ('alice', 'congress', 'manage', 'global', 'congress-123')
        ",
    )
    .execute(store.pool())
    .await;
    assert!(result.is_err());

    // Scoped row with blank id.
    let result = query(
        "
        INSERT INTO
            access_overrides_v1 (user_id, space, access_level, scope_type, scope_id)
        VALUES
            ('alice', 'initiatives', 'view', 'initiative', ' ')
        ",
    )
    .execute(store.pool())
    .await;
    assert!(result.is_err());

    // Duplicate global key.
    let insert_global = "
        INSERT INTO
            access_overrides_v1 (user_id, space, access_level, scope_type, scope_id)
        VALUES
            ('alice', 'tasks', 'view', 'global', NULL)
        ";
    assert!(query(insert_global).execute(store.pool()).await.is_ok());
    assert!(query(insert_global).execute(store.pool()).await.is_err());
}

#[tokio::test]
async fn sqlite_reports_corrupted_rows() {
    let store = SqliteStore::temporary().await;

    query(
        "
        INSERT INTO
            access_overrides_v1 (user_id, space, access_level, scope_type, scope_id)
        VALUES
            ('alice', 'settings', 'manage', 'global', NULL)
        ",
    )
    .execute(store.pool())
    .await
    .unwrap();

    // Broken data is an error, never an empty result.
    assert!(matches!(
        store.global_overrides(&alice()).await,
        Err(SqliteError::Decode(field, _)) if field == "space"
    ));
    assert!(
        resolve_all_spaces(&alice(), Some("Researcher"), &store)
            .await
            .is_err()
    );
}
