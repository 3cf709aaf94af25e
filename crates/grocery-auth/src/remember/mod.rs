//! Remember-me persistence.
//!
//! Only the email address is remembered, never the password. The record lives in two
//! settings:
//!
//! - `RememberMe` (`bool`): set only while remembering is enabled.
//! - `SavedEmail` (`String`): the email to pre-fill on the login screen.
//!
//! Storage is plain preference storage without encryption.

mod remember_store;

pub use remember_store::{CredentialRememberStore, RememberStoreError, RememberedCredential};
