use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use grocery_state::repository::{Repository, RepositoryError, RepositoryItem};
use tokio::sync::RwLock;

/// In-memory [`Repository`] for tests.
pub struct MemoryRepository<V> {
    store: RwLock<HashMap<String, V>>,
}

impl<V> Default for MemoryRepository<V> {
    fn default() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> MemoryRepository<V> {
    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the repository holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl<V: RepositoryItem + Clone> Repository<V> for MemoryRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        Ok(self.store.read().await.get(&key).cloned())
    }

    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        self.store.write().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        self.store.write().await.remove(&key);
        Ok(())
    }
}

/// [`Repository`] that fails every operation with [`RepositoryError::Unavailable`].
///
/// Counts the calls it receives so tests can assert the store was (or wasn't) touched.
#[derive(Default)]
pub struct FailingRepository {
    calls: AtomicUsize,
}

impl FailingRepository {
    /// Number of operations attempted against this repository.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self, operation: &str) -> Result<T, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::Unavailable(format!("{operation} failed")))
    }
}

#[async_trait::async_trait]
impl<V: RepositoryItem> Repository<V> for FailingRepository {
    async fn get(&self, _key: String) -> Result<Option<V>, RepositoryError> {
        self.fail("get")
    }

    async fn set(&self, _key: String, _value: V) -> Result<(), RepositoryError> {
        self.fail("set")
    }

    async fn remove(&self, _key: String) -> Result<(), RepositoryError> {
        self.fail("remove")
    }
}
