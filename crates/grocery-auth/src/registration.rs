use crate::LoginController;

/// Whether new accounts can be created from the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// Registration isn't available yet.
    ComingSoon,
}

impl RegistrationStatus {
    /// Notice shown to a user who asked to register.
    pub fn notice(&self) -> &'static str {
        match self {
            RegistrationStatus::ComingSoon => "Registration is coming soon!",
        }
    }
}

impl LoginController {
    /// Reports whether the user can register a new account.
    pub fn register(&self) -> RegistrationStatus {
        RegistrationStatus::ComingSoon
    }
}
