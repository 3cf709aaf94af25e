#![doc = include_str!("../README.md")]

mod auth_service;
mod registration;

/// Login controller, its state machine and supporting models.
pub mod login;

/// Remember-me persistence.
pub mod remember;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::{AuthService, AuthServiceError, AuthenticatedIdentity};
pub use login::LoginController;
pub use registration::RegistrationStatus;
pub use remember::{CredentialRememberStore, RememberStoreError, RememberedCredential};
