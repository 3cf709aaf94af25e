use super::LoginAttemptState;

/// Notifications published by the [`LoginController`](crate::LoginController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    /// The attempt moved to a new state.
    StateChanged(LoginAttemptState),
    /// The loading indicator was switched on or off.
    LoadingChanged(bool),
    /// The login succeeded and the app should switch to its main screen.
    NavigateToMain,
}
