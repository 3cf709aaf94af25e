//! Type-safe settings stored on top of a [`Repository<SettingItem>`](crate::repository::Repository).
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use grocery_state::{register_setting_key, repository::Repository, Setting, SettingItem};
//!
//! register_setting_key!(const THEME: String = "Theme");
//!
//! async fn example(
//!     repository: Arc<dyn Repository<SettingItem>>,
//! ) -> Result<(), grocery_state::SettingsError> {
//!     let theme = Setting::new(repository, THEME);
//!
//!     theme.set(&"dark".to_string()).await?;
//!     let value: Option<String> = theme.get().await?;
//!     assert_eq!(value.as_deref(), Some("dark"));
//!
//!     theme.remove().await?;
//!     Ok(())
//! }
//! ```

mod key;
mod setting;

pub use key::Key;
pub use setting::{Setting, SettingItem, SettingsError};
