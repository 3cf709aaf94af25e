use tracing::{info, warn};

use super::LoginController;

/// Progress of a "forgot password" request from the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetStep {
    /// No email entered yet; the user has to fill it in first.
    EmailRequired,
    /// Ask the user to confirm sending a reset link to `email`.
    ConfirmationRequired {
        /// Address the link would be sent to.
        email: String,
    },
    /// The user declined.
    Cancelled,
    /// The reset link was sent.
    LinkSent {
        /// Address the link was sent to.
        email: String,
    },
    /// The auth service couldn't send the link.
    Failed(String),
}

impl PasswordResetStep {
    /// Text to show the user for this step.
    pub fn message(&self) -> String {
        match self {
            PasswordResetStep::EmailRequired => {
                "Enter your email address first to reset your password.".to_string()
            }
            PasswordResetStep::ConfirmationRequired { email } => {
                format!("Send a password reset link to {email}?")
            }
            PasswordResetStep::Cancelled => "Password reset cancelled.".to_string(),
            PasswordResetStep::LinkSent { email } => format!("Reset link sent to {email}"),
            PasswordResetStep::Failed(reason) => format!("Could not send reset link: {reason}"),
        }
    }
}

impl LoginController {
    /// First step of a password reset: checks that an email was entered.
    pub fn forgot_password(&self, email: &str) -> PasswordResetStep {
        if email.trim().is_empty() {
            return PasswordResetStep::EmailRequired;
        }

        PasswordResetStep::ConfirmationRequired {
            email: email.to_owned(),
        }
    }

    /// Second step of a password reset: sends the link if the user confirmed.
    pub async fn confirm_password_reset(&self, email: &str, confirmed: bool) -> PasswordResetStep {
        if !confirmed {
            return PasswordResetStep::Cancelled;
        }
        if email.trim().is_empty() {
            return PasswordResetStep::EmailRequired;
        }

        match self.auth_service.request_password_reset(email).await {
            Ok(()) => {
                info!("Password reset link requested");
                PasswordResetStep::LinkSent {
                    email: email.to_owned(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Password reset request failed");
                PasswordResetStep::Failed(e.to_string())
            }
        }
    }
}
