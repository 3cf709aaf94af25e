use std::fmt;

/// Email and password entered for a single login attempt. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address as typed by the user.
    pub email: String,
    /// Password as typed by the user.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Initial values for the login form, restored from the remember-me store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefilledCredentials {
    /// Remembered email, or empty.
    pub email: String,
    /// Whether the remember-me box starts checked.
    pub remember: bool,
}
