//! SQLite-backed key/value store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::store::{KeyValueStore, KvEntry, NewKvEntry, StoreError, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Durable [`KeyValueStore`] in a single SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the store at `db_path`, creating the file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Failed to run migrations: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;

        let entry = schema::kv_entries::table
            .filter(schema::kv_entries::key.eq(key))
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = entry.is_some(), "Looked up key");
        Ok(entry.map(|e| e.value().clone()))
    }

    #[instrument(skip(self))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        diesel::replace_into(schema::kv_entries::table)
            .values(&NewKvEntry::new(key, value))
            .execute(&mut conn)?;

        debug!("Stored key");
        Ok(())
    }
}
