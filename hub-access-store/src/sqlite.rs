// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistent storage.
use hub_access::{ParseAccessLevelError, ParseSpaceError, ScopeError};
use sqlx::migrate::{MigrateDatabase, Migrator};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, migrate};
use thiserror::Error;

/// Create SQLite database if it doesn't already exist.
pub async fn create_database(url: &str) -> Result<(), SqliteError> {
    if !Sqlite::database_exists(url).await? {
        Sqlite::create_database(url).await?
    }
    Ok(())
}

/// Drop SQLite database if it exists.
pub async fn drop_database(url: &str) -> Result<(), SqliteError> {
    if Sqlite::database_exists(url).await? {
        Sqlite::drop_database(url).await?
    }
    Ok(())
}

/// Create SQLite connection pool.
pub async fn connection_pool(
    url: &str,
    max_connections: u32,
) -> Result<sqlx::SqlitePool, SqliteError> {
    let pool: sqlx::SqlitePool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    Ok(pool)
}

/// Get migrations from folder without running them.
pub fn migrations() -> Migrator {
    migrate!()
}

/// Run any pending database migrations from inside the application.
pub async fn run_pending_migrations(pool: &sqlx::SqlitePool) -> Result<(), SqliteError> {
    migrations().run(pool).await?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct SqliteStoreBuilder {
    url: String,
    max_connections: u32,
    run_migrations: bool,
    create_database: bool,
}

impl Default for SqliteStoreBuilder {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 16,
            create_database: true,
            run_migrations: true,
        }
    }
}

impl SqliteStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(any(test, feature = "test_utils"))]
    pub fn random_memory_url(mut self) -> Self {
        // Every temporary database gets a different, random name to keep in-memory databases of
        // concurrently running tests isolated from each other.
        //
        // See related issue: https://github.com/launchbadge/sqlx/issues/2510
        self.url = format!(
            "sqlite://dbmem{}?mode=memory&cache=private",
            rand::random::<u32>()
        );
        self
    }

    pub fn database_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn create_database(mut self, create_database: bool) -> Self {
        self.create_database = create_database;
        self
    }

    pub fn run_default_migrations(mut self, run_migrations: bool) -> Self {
        self.run_migrations = run_migrations;
        self
    }

    pub async fn build(self) -> Result<SqliteStore, SqliteError> {
        if self.create_database {
            create_database(&self.url).await?;
        }

        let pool = connection_pool(&self.url, self.max_connections).await?;

        if self.run_migrations {
            run_pending_migrations(&pool).await?;
        }

        Ok(SqliteStore::new(pool))
    }
}

/// SQLite database with connection pool.
///
/// This struct can be cloned and used in multiple places in the application, every cloned
/// instance re-uses the same connection pool.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pub(crate) pool: sqlx::SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// Shortcut building an in-memory SQLite database with a randomised name for testing purposes.
    #[cfg(any(test, feature = "test_utils"))]
    pub async fn temporary() -> Self {
        SqliteStoreBuilder::new()
            .random_memory_url()
            .max_connections(1)
            .build()
            .await
            .expect("migrations succeeded")
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}

#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database and connection error.
    #[error(transparent)]
    Sqlite(#[from] sqlx::Error),

    /// SQL table schema migration error.
    #[error(transparent)]
    Migrate(#[from] migrate::MigrateError),

    /// Override record was refused before it was written to the database.
    #[error("invalid override scope: {0}")]
    InvalidScope(ScopeError),

    /// Invalid, corrupted data was found in the database. This is a critical error.
    #[error("could not decode corrupted '{0}' value from database: {1}")]
    Decode(String, DecodeError),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    AccessLevel(#[from] ParseAccessLevelError),

    #[error(transparent)]
    Space(#[from] ParseSpaceError),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

#[cfg(test)]
mod tests {
    use sqlx::Sqlite;
    use sqlx::migrate::MigrateDatabase;
    use sqlx::query_as;

    use super::{SqliteStore, SqliteStoreBuilder, create_database, drop_database, migrations};

    #[tokio::test]
    async fn migrations_create_overrides_table() {
        let store = SqliteStore::temporary().await;

        let (count,): (i64,) = query_as(
            "
            SELECT
                COUNT(*)
            FROM
                sqlite_master
            WHERE
                type = 'table' AND name = 'access_overrides_v1'
            ",
        )
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(count, 1);
        assert!(migrations().iter().count() > 0);
    }

    #[tokio::test]
    async fn builder_without_migrations() {
        let store = SqliteStoreBuilder::new()
            .random_memory_url()
            .max_connections(1)
            .run_default_migrations(false)
            .build()
            .await
            .unwrap();

        let (count,): (i64,) = query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'access_overrides_v1'",
        )
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn create_and_drop_database_file() {
        let path =
            std::env::temp_dir().join(format!("hub-access-{}.sqlite", rand::random::<u32>()));
        let url = format!("sqlite://{}", path.display());

        create_database(&url).await.unwrap();
        assert!(Sqlite::database_exists(&url).await.unwrap());

        // Creating an existing database is a no-op.
        create_database(&url).await.unwrap();

        drop_database(&url).await.unwrap();
        assert!(!Sqlite::database_exists(&url).await.unwrap());

        // Dropping a missing database is a no-op as well.
        drop_database(&url).await.unwrap();
    }
}
