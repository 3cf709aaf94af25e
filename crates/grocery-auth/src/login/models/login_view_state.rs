use super::LoginAttemptState;

/// How a [`LoginMessage`] should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    /// Rendered in red.
    Error,
    /// Rendered in green.
    Success,
}

/// Message shown below the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginMessage {
    /// Text to display.
    pub text: String,
    /// Error or success styling.
    pub severity: MessageSeverity,
}

impl LoginMessage {
    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: MessageSeverity::Error,
        }
    }

    pub(crate) fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: MessageSeverity::Success,
        }
    }
}

/// Snapshot of everything the login screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginViewState {
    /// Email in the form.
    pub email: String,
    /// Whether the remember-me box is checked.
    pub remember: bool,
    /// Whether the loading indicator is shown.
    pub is_loading: bool,
    /// Current attempt state.
    pub attempt: LoginAttemptState,
    /// Message to display, if any.
    pub message: Option<LoginMessage>,
}

impl LoginViewState {
    /// Whether there is a message to display.
    pub fn has_message(&self) -> bool {
        self.message
            .as_ref()
            .is_some_and(|message| !message.text.is_empty())
    }
}
