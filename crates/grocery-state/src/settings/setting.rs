//! Setting handles for type-safe access to individual settings.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::Key;
use crate::repository::{Repository, RepositoryError};

/// One setting value as stored in the settings table.
///
/// Every setting shares the same table, so values are kept as JSON and only get a type back
/// through the [`Key`] they are read with.
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingItem(pub(crate) serde_json::Value);

crate::register_repository_item!(SettingItem, "Setting");

impl SettingItem {
    fn encode<T: Serialize>(key: &'static str, value: &T) -> Result<Self, SettingsError> {
        serde_json::to_value(value)
            .map(SettingItem)
            .map_err(|source| SettingsError::Encode { key, source })
    }

    fn decode<T: DeserializeOwned>(self, key: &'static str) -> Result<T, SettingsError> {
        serde_json::from_value(self.0).map_err(|source| SettingsError::Decode { key, source })
    }
}

/// Errors that can occur when working with settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The stored value isn't a valid `T`, usually because another type was written under
    /// the same key.
    #[error("Setting '{key}' holds an unexpected value: {source}")]
    Decode {
        /// Name of the setting.
        key: &'static str,
        /// What the JSON decoder rejected.
        source: serde_json::Error,
    },
    /// The value couldn't be turned into JSON.
    #[error("Setting '{key}' can't be stored: {source}")]
    Encode {
        /// Name of the setting.
        key: &'static str,
        /// What the JSON encoder rejected.
        source: serde_json::Error,
    },
    /// The settings repository failed.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// One setting, bound to the repository it lives in.
pub struct Setting<T> {
    repository: Arc<dyn Repository<SettingItem>>,
    key: Key<T>,
}

impl<T> Setting<T> {
    /// Binds `key` to `repository`.
    pub fn new(repository: Arc<dyn Repository<SettingItem>>, key: Key<T>) -> Self {
        Self { repository, key }
    }

    /// Deletes the stored value. Succeeds when nothing is stored.
    pub async fn remove(&self) -> Result<(), SettingsError> {
        Ok(self.repository.remove(self.key.name().to_owned()).await?)
    }
}

impl<T: Serialize> Setting<T> {
    /// Stores `value`, replacing the previous one.
    pub async fn set(&self, value: &T) -> Result<(), SettingsError> {
        let item = SettingItem::encode(self.key.name(), value)?;
        Ok(self.repository.set(self.key.name().to_owned(), item).await?)
    }
}

impl<T: DeserializeOwned> Setting<T> {
    /// The stored value, or `None` if the setting was never written.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Decode`] if something other than a `T` is stored under this key,
    /// [`SettingsError::Storage`] if the repository fails.
    pub async fn get(&self) -> Result<Option<T>, SettingsError> {
        self.repository
            .get(self.key.name().to_owned())
            .await?
            .map(|item| item.decode(self.key.name()))
            .transpose()
    }

    /// The stored value, or `T::default()` if the setting was never written.
    pub async fn get_or_default(&self) -> Result<T, SettingsError>
    where
        T: Default,
    {
        Ok(self.get().await?.unwrap_or_default())
    }
}
