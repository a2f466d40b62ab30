//! SQLite-backed store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::models::{KvEntry, NewKvEntry};
use super::schema;
use crate::{KeyValueStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Key-value store persisted to a SQLite database file.
///
/// Opens a fresh connection per operation, so the database must be a file
/// path; use [`MemoryStore`](crate::MemoryStore) for throwaway state.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument]
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::migration(&*e))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore opened");
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        Ok(SqliteConnection::establish(&self.db_path)?)
    }
}

impl KeyValueStore for SqliteStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;

        let entry = schema::kv_entries::table
            .find(key)
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;

        match entry {
            Some(entry) => {
                debug!(key = %entry.key(), updated_at = %entry.updated_at(), "Entry found");
                Ok(Some(entry.value().clone()))
            }
            None => {
                debug!("Entry not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let entry = NewKvEntry::new(key, value, Utc::now().naive_utc());
        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut conn)?;

        debug!(len = value.len(), "Entry written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(schema::kv_entries::table.find(key)).execute(&mut conn)?;

        debug!(deleted, "Entry removed");
        Ok(())
    }
}
