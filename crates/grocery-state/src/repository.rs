use serde::{de::DeserializeOwned, Serialize};

/// Failure of a [`Repository`] operation.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// The backing store couldn't be reached or refused the operation.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// The SQLite backend failed.
    #[error(transparent)]
    Database(#[from] crate::persistent::DatabaseError),
}

/// Key-value storage for one item type.
#[async_trait::async_trait]
pub trait Repository<V: RepositoryItem>: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError>;
    /// Stores `value` under `key`, replacing what was there.
    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError>;
    /// Deletes `key`. Deleting a missing key succeeds.
    async fn remove(&self, key: String) -> Result<(), RepositoryError>;
}

/// A type that can be kept in a [`Repository`].
///
/// Implemented through [`crate::register_repository_item`] only.
pub trait RepositoryItem:
    sealed::Registered + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Table holding items of this type. Renaming it orphans existing data.
    const TABLE: &'static str;

    /// Table description to pass to [`crate::SqliteDatabase::open`].
    fn table() -> ItemTable {
        ItemTable { name: Self::TABLE }
    }
}

/// A table the SQLite backend has to create on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTable {
    name: &'static str,
}

impl ItemTable {
    /// Table name, checked by [`is_valid_table_name`] at compile time.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Whether `name` can be spliced into SQL as a table name: ASCII letters and underscores,
/// at least one character.
pub const fn is_valid_table_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !matches!(bytes[i], b'a'..=b'z' | b'A'..=b'Z' | b'_') {
            return false;
        }
        i += 1;
    }
    !bytes.is_empty()
}

/// Makes `$ty` storable in a [`Repository`] under the table `$table`.
///
/// Register each type once, next to its definition. A table name that
/// [`is_valid_table_name`] rejects fails to compile.
#[macro_export]
macro_rules! register_repository_item {
    ($ty:ty, $table:literal) => {
        const _: () = {
            impl $crate::repository::sealed::Registered for $ty {}
            impl $crate::repository::RepositoryItem for $ty {
                const TABLE: &'static str = $table;
            }
            assert!(
                $crate::repository::is_valid_table_name($table),
                concat!("Invalid table name '", $table, "', use letters and underscores only")
            )
        };
    };
}

#[doc(hidden)]
pub mod sealed {
    pub trait Registered {}
}
