use thiserror::Error;

/// Where a login attempt currently is.
///
/// `Idle` until the first submit. Every submit moves through `Validating` (and `InFlight`
/// when the input is acceptable) into one of the terminal states, `Succeeded` or `Failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginAttemptState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Checking the entered email and password locally.
    Validating,
    /// Waiting for the auth service.
    InFlight,
    /// Logged in. Carries the user's display name.
    Succeeded(String),
    /// The attempt failed.
    Failed(LoginFailure),
}

impl LoginAttemptState {
    /// Whether an attempt is running, which blocks new submits.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Validating | Self::InFlight)
    }

    /// Whether this state ends an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// Why a login attempt failed. All of these are recoverable by submitting again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginFailure {
    /// Email or password was empty or whitespace only.
    #[error("missing fields")]
    MissingFields,

    /// The email is not a plain `local@domain` address.
    #[error("invalid email")]
    InvalidEmailFormat,

    /// The auth service didn't recognize the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The auth service failed.
    #[error("unexpected error: {0}")]
    UnexpectedError(String),
}

impl LoginFailure {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            LoginFailure::MissingFields => {
                "Enter both your email address and password.".to_string()
            }
            LoginFailure::InvalidEmailFormat => "Enter a valid email address.".to_string(),
            LoginFailure::InvalidCredentials => {
                "Invalid credentials. Check your email address and password.".to_string()
            }
            LoginFailure::UnexpectedError(message) => {
                format!("An error occurred while logging in: {message}")
            }
        }
    }
}
