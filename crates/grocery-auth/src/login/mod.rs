//! Login module
//!
//! The [`LoginController`] authenticates a user with email and password:
//!
//! 1. [`LoginController::initialize`] restores the remembered email, if any.
//! 2. [`LoginController::submit`] validates the input, calls the
//!    [`AuthService`](crate::AuthService) and records the remember-me choice on success.
//! 3. Subscribers follow along through [`LoginEvent`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use grocery_auth::{AuthService, CredentialRememberStore, LoginController};
//! # use grocery_auth::login::{LoginAttemptState, LoginSettings};
//! # async fn example(
//! #     auth_service: Arc<dyn AuthService>,
//! #     remember_store: CredentialRememberStore,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let controller = LoginController::new(auth_service, remember_store, LoginSettings::default());
//! let form = controller.initialize().await;
//!
//! match controller.submit(form.email, "user3", true).await? {
//!     LoginAttemptState::Succeeded(name) => println!("Welcome back, {name}!"),
//!     LoginAttemptState::Failed(failure) => println!("{}", failure.user_message()),
//!     _ => unreachable!("submit always ends in a terminal state"),
//! }
//! # Ok(())
//! # }
//! ```

mod loading;
mod login_controller;
mod password_reset;
mod settings;
mod validation;

/// Models used by the login module
pub mod models;

pub use login_controller::{LoginController, SubmitError};
pub use models::{
    Credentials, LoginAttemptState, LoginEvent, LoginFailure, LoginMessage, LoginViewState,
    MessageSeverity, PrefilledCredentials,
};
pub use password_reset::PasswordResetStep;
pub use settings::LoginSettings;
pub use validation::is_valid_email;
