use std::{marker::PhantomData, sync::Arc};

use thiserror::Error;

use crate::repository::{Repository, RepositoryError, RepositoryItem};

mod configuration;
mod sqlite;

pub use configuration::DatabaseConfiguration;
pub use sqlite::SqliteDatabase;

/// Errors raised by the persistent database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying SQLite call failed.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

struct SqliteRepository<V: RepositoryItem> {
    database: SqliteDatabase,
    _marker: PhantomData<V>,
}

#[async_trait::async_trait]
impl<V: RepositoryItem> Repository<V> for SqliteRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        Ok(self.database.get::<V>(&key).await?)
    }
    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        Ok(self.database.set::<V>(&key, value).await?)
    }
    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        Ok(self.database.remove::<V>(&key).await?)
    }
}

impl SqliteDatabase {
    /// Returns a repository for `V` backed by this database.
    ///
    /// `V` must have been passed to [`SqliteDatabase::open`], otherwise every operation fails
    /// with a missing-table error.
    pub fn get_repository<V: RepositoryItem>(&self) -> Arc<dyn Repository<V>> {
        Arc::new(SqliteRepository::<V> {
            database: self.clone(),
            _marker: PhantomData,
        })
    }
}
