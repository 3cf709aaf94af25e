use thiserror::Error;

/// The user returned by a successful [`AuthService::authenticate`] call.
///
/// The login flow only reads the display name, everything else about the account stays with
/// the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Name shown in the welcome message.
    pub display_name: String,
}

impl AuthenticatedIdentity {
    /// Creates an identity with the given display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

/// Errors raised by an [`AuthService`]. Rejected credentials are not an error, they are
/// reported as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthServiceError {
    /// The service could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The service failed while handling the request.
    #[error("{0}")]
    Internal(String),

    /// The service doesn't implement the requested operation.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Authenticates users on behalf of the [`LoginController`](crate::LoginController).
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Checks the given credentials.
    ///
    /// Returns `Ok(Some(identity))` for a known user, `Ok(None)` when the credentials are
    /// rejected and `Err` when the check itself could not be performed.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedIdentity>, AuthServiceError>;

    /// Sends a password reset link to `email`.
    async fn request_password_reset(&self, _email: &str) -> Result<(), AuthServiceError> {
        Err(AuthServiceError::Unsupported("password reset"))
    }
}
