//! Local state for the CLI.
//!
//! The remember-me preferences live in `preferences.sqlite` inside the state directory:
//! `--state-dir` when given, otherwise `~/.config/grocery` (Unix) or `%APPDATA%\grocery`
//! (Windows). The directory is created on first use and, on Unix, restricted to the
//! current user. Nothing is encrypted at rest; only the email and the remember flag are stored.

use std::path::PathBuf;

use grocery_state::{
    repository::RepositoryItem, DatabaseConfiguration, SettingItem, SqliteDatabase,
};
use thiserror::Error;
use tracing::debug;

use crate::directory::DirectoryError;

/// Errors that can occur while preparing CLI state.
#[derive(Debug, Error)]
pub(crate) enum StateError {
    /// Config directory not found (HOME or APPDATA not set).
    #[error("Config directory not found (HOME or APPDATA environment variable not set)")]
    ConfigDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] grocery_state::DatabaseError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub(super) fn open_preferences(state_dir: Option<PathBuf>) -> Result<SqliteDatabase, StateError> {
    let folder_path = ensure_state_dir(state_dir)?;
    debug!(?folder_path, "Opening preferences");

    let database = SqliteDatabase::open(
        DatabaseConfiguration::Sqlite {
            // The .sqlite extension is added by grocery-state
            db_name: "preferences".to_string(),
            folder_path,
        },
        &[SettingItem::table()],
    )?;

    Ok(database)
}

fn default_state_dir() -> Result<PathBuf, StateError> {
    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA").map_err(|_| StateError::ConfigDirNotFound)?;
        Ok(PathBuf::from(appdata).join("grocery"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").map_err(|_| StateError::ConfigDirNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("grocery"))
    }
}

fn ensure_state_dir(state_dir: Option<PathBuf>) -> Result<PathBuf, StateError> {
    let dir = match state_dir {
        Some(dir) => dir,
        None => default_state_dir()?,
    };
    std::fs::create_dir_all(&dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        std::fs::set_permissions(&dir, perms)?;
    }

    Ok(dir)
}
