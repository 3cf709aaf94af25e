use std::sync::Arc;

use rusqlite::OptionalExtension;
use tokio::sync::Mutex;
use tracing::debug;

use super::{DatabaseConfiguration, DatabaseError};
use crate::repository::{ItemTable, RepositoryItem};

/// SQLite-backed storage with one `(key, value)` table per registered repository item.
///
/// Values are stored as JSON text. Table names come from [`RepositoryItem::TABLE`], which
/// [`crate::register_repository_item`] restricts to letters and underscores.
#[derive(Clone)]
pub struct SqliteDatabase(Arc<Mutex<rusqlite::Connection>>);

impl std::fmt::Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabase").finish()
    }
}

impl SqliteDatabase {
    /// Opens (or creates) the database and makes sure a table exists for every item.
    /// This is idempotent.
    pub fn open(
        configuration: DatabaseConfiguration,
        items: &[ItemTable],
    ) -> Result<Self, DatabaseError> {
        let mut db = match configuration {
            DatabaseConfiguration::Sqlite {
                db_name,
                folder_path,
            } => {
                let path = folder_path.join(format!("{db_name}.sqlite"));
                debug!(?path, "Opening database");
                let db = rusqlite::Connection::open(path)?;
                db.pragma_update(None, "journal_mode", "WAL")?;
                db
            }
            DatabaseConfiguration::InMemory => rusqlite::Connection::open_in_memory()?,
        };

        let transaction = db.transaction()?;
        for item in items {
            transaction.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS \"{}\" (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
                    item.name()
                ),
                [],
            )?;
        }
        transaction.commit()?;

        Ok(SqliteDatabase(Arc::new(Mutex::new(db))))
    }

    pub(super) async fn get<T: RepositoryItem>(&self, key: &str) -> Result<Option<T>, DatabaseError> {
        let conn = self.0.lock().await;
        let value: Option<String> = conn
            .query_row(
                &format!("SELECT value FROM \"{}\" WHERE key = ?1", T::TABLE),
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    pub(super) async fn set<T: RepositoryItem>(
        &self,
        key: &str,
        value: T,
    ) -> Result<(), DatabaseError> {
        let value = serde_json::to_string(&value)?;

        let conn = self.0.lock().await;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO \"{}\" (key, value) VALUES (?1, ?2)",
                T::TABLE
            ),
            rusqlite::params![key, value],
        )?;

        Ok(())
    }

    pub(super) async fn remove<T: RepositoryItem>(&self, key: &str) -> Result<(), DatabaseError> {
        let conn = self.0.lock().await;
        conn.execute(
            &format!("DELETE FROM \"{}\" WHERE key = ?1", T::TABLE),
            [key],
        )?;

        Ok(())
    }
}
