//! Local user directory backing the CLI's auth service.

use std::path::{Path, PathBuf};

use grocery_auth::{AuthService, AuthServiceError, AuthenticatedIdentity};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// An account accepted by [`LocalAuthService`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserRecord {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Error)]
pub(crate) enum DirectoryError {
    #[error("Failed to read users file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse users file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Checks credentials against a fixed list of accounts.
///
/// Emails and passwords are compared exactly. Password resets are accepted for any known
/// email and logged; no mail is sent.
#[derive(Debug, Default)]
pub(crate) struct LocalAuthService {
    users: Vec<UserRecord>,
}

impl LocalAuthService {
    pub(crate) fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Loads accounts from a JSON array of `{ name, email, password }` objects.
    pub(crate) fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let users: Vec<UserRecord> =
            serde_json::from_str(&contents).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(count = users.len(), "Loaded user directory");
        Ok(Self::new(users))
    }

    fn find(&self, email: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.email == email)
    }
}

#[async_trait::async_trait]
impl AuthService for LocalAuthService {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedIdentity>, AuthServiceError> {
        if self.users.is_empty() {
            warn!("No users configured, every login will be rejected");
        }

        Ok(self
            .find(email)
            .filter(|user| user.password == password)
            .map(|user| AuthenticatedIdentity::new(user.name.clone())))
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthServiceError> {
        match self.find(email) {
            Some(_) => debug!("Password reset requested for a known account"),
            // Unknown emails get the same answer so accounts can't be probed
            None => debug!("Password reset requested for an unknown account"),
        }
        Ok(())
    }
}
