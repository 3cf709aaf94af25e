use validator::ValidateEmail;

use super::{Credentials, LoginFailure};

/// Checks the input locally before anything is sent to the auth service.
pub(crate) fn validate_credentials(credentials: &Credentials) -> Result<(), LoginFailure> {
    if credentials.email.trim().is_empty() || credentials.password.trim().is_empty() {
        return Err(LoginFailure::MissingFields);
    }

    if !is_valid_email(&credentials.email) {
        return Err(LoginFailure::InvalidEmailFormat);
    }

    Ok(())
}

/// Returns true if `email` is exactly a bare `local@domain` address.
///
/// Anything beyond the address itself is rejected: display names (`Jane <jane@mail.com>`),
/// angle brackets and surrounding whitespace.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}
