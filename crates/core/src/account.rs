//! Signup and login input rules.

use crate::error::CoreError;

/// Default minimum password length when not overridden by configuration.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a signup submission.
///
/// Checks, in order: every field present and non-blank, password length,
/// then password confirmation. Email format is checked at the HTTP layer.
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    min_password_length: usize,
) -> Result<(), CoreError> {
    if [username, email, password, confirm_password]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(CoreError::Validation("All fields are required.".into()));
    }

    if password.chars().count() < min_password_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_password_length} characters."
        )));
    }

    if password != confirm_password {
        return Err(CoreError::Validation("Passwords do not match.".into()));
    }

    Ok(())
}

/// Validate a login submission. The identifier may be a username or an email.
pub fn validate_login(identifier: &str, password: &str) -> Result<(), CoreError> {
    if identifier.trim().is_empty() || password.is_empty() {
        return Err(CoreError::Validation("Both fields are required.".into()));
    }
    Ok(())
}
