use std::sync::Arc;

use grocery_state::{
    register_setting_key, repository::Repository, Key, Setting, SettingItem, SettingsError,
};
use thiserror::Error;
use tracing::{debug, warn};

register_setting_key!(const REMEMBER_ME: bool = "RememberMe");
register_setting_key!(const SAVED_EMAIL: String = "SavedEmail");

/// The persisted remember-me record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedCredential {
    /// Email to pre-fill on the login screen.
    pub email: String,
    /// Whether remembering is enabled. A record with `remember == false` is never stored.
    pub remember: bool,
}

impl RememberedCredential {
    /// A record that remembers `email`.
    pub fn remembered(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            remember: true,
        }
    }
}

/// Errors from the remember-me storage.
#[derive(Debug, Error)]
pub enum RememberStoreError {
    /// Reading or writing one of the settings failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Typed facade over the `RememberMe` and `SavedEmail` settings.
///
/// Remembering is best-effort. [`load`](Self::load), [`save`](Self::save) and
/// [`clear`](Self::clear) log storage failures and carry on; the `try_*` variants surface
/// them.
#[derive(Clone)]
pub struct CredentialRememberStore {
    repository: Arc<dyn Repository<SettingItem>>,
}

impl CredentialRememberStore {
    /// Creates a store on top of a settings repository.
    pub fn new(repository: Arc<dyn Repository<SettingItem>>) -> Self {
        Self { repository }
    }

    fn setting<T>(&self, key: Key<T>) -> Setting<T> {
        Setting::new(Arc::clone(&self.repository), key)
    }

    /// Reads the remembered credential. Any storage error reads as "nothing remembered".
    pub async fn load(&self) -> Option<RememberedCredential> {
        match self.try_load().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Failed to load remembered credential: {}", e);
                None
            }
        }
    }

    /// Stores `credential`, replacing any previous record.
    ///
    /// A credential with `remember == false` clears the store instead, so no stale email is
    /// kept around.
    pub async fn save(&self, credential: &RememberedCredential) {
        if let Err(e) = self.try_save(credential).await {
            warn!("Failed to save remembered credential: {}", e);
        }
    }

    /// Removes the remembered credential. Clearing an empty store is a no-op.
    pub async fn clear(&self) {
        if let Err(e) = self.try_clear().await {
            warn!("Failed to clear remembered credential: {}", e);
        }
    }

    /// Like [`load`](Self::load), but surfaces storage errors.
    pub async fn try_load(&self) -> Result<Option<RememberedCredential>, RememberStoreError> {
        if !self.setting(REMEMBER_ME).get_or_default().await? {
            return Ok(None);
        }

        let email = self.setting(SAVED_EMAIL).get_or_default().await?;
        debug!("Remembered credential loaded");

        Ok(Some(RememberedCredential {
            email,
            remember: true,
        }))
    }

    /// Like [`save`](Self::save), but surfaces storage errors.
    pub async fn try_save(
        &self,
        credential: &RememberedCredential,
    ) -> Result<(), RememberStoreError> {
        if !credential.remember {
            return self.try_clear().await;
        }

        // The email goes first so a failure never leaves the flag set without it.
        self.setting(SAVED_EMAIL).set(&credential.email).await?;
        self.setting(REMEMBER_ME).set(&true).await?;
        debug!("Remembered credential saved");

        Ok(())
    }

    /// Like [`clear`](Self::clear), but surfaces storage errors.
    pub async fn try_clear(&self) -> Result<(), RememberStoreError> {
        // The flag goes first so a failure never leaves an email that would still load.
        self.setting(REMEMBER_ME).remove().await?;
        self.setting(SAVED_EMAIL).remove().await?;
        debug!("Remembered credential cleared");

        Ok(())
    }
}
