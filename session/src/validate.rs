//! Local input checks applied before any backend call.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::error::InputError;

/// Trim and lowercase an email, requiring exactly one `@` with non-empty
/// local and domain parts.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

/// Validate an email for password-reset style calls.
///
/// # Errors
///
/// Returns [`InputError::InvalidEmail`] if the address is implausible.
pub fn validate_email(email: &str) -> Result<String, InputError> {
    normalize_email(email).ok_or(InputError::InvalidEmail)
}

/// Validate an email/password pair. The password is passed through untouched.
///
/// # Errors
///
/// Returns the first [`InputError`] found, email first.
pub fn validate_credentials(email: &str, password: &str) -> Result<(String, String), InputError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(InputError::EmptyPassword);
    }
    Ok((email, password.to_owned()))
}
