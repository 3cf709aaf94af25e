#![doc = include_str!("../README.md")]

/// This module provides a generic repository interface for storing and retrieving items.
pub mod repository;

/// Type-safe settings stored on top of a repository.
pub mod settings;

mod persistent;

pub use persistent::{DatabaseConfiguration, DatabaseError, SqliteDatabase};
pub use settings::{Key, Setting, SettingItem, SettingsError};
