mod credentials;
mod login_attempt_state;
mod login_event;
mod login_view_state;

pub use credentials::{Credentials, PrefilledCredentials};
pub use login_attempt_state::{LoginAttemptState, LoginFailure};
pub use login_event::LoginEvent;
pub use login_view_state::{LoginMessage, LoginViewState, MessageSeverity};
