//! Profile validation utilities

use thiserror::Error;

/// Errors raised while validating profile fields
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    #[error("Display name exceeds maximum length of {0} characters")]
    DisplayNameTooLong(usize),

    #[error("Email address '{0}' is not valid")]
    InvalidEmail(String),

    #[error("Budget amount must be a finite, non-negative number")]
    InvalidAmount,
}

const MAX_USER_ID_LENGTH: usize = 128;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate a user ID
///
/// Identifiers are issued by the authentication provider, so only the
/// character set and length are checked.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(UserValidationError::InvalidIdCharacter(c));
    }

    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), UserValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyDisplayName);
    }

    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(UserValidationError::DisplayNameTooLong(
            MAX_DISPLAY_NAME_LENGTH,
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let invalid = || UserValidationError::InvalidEmail(email.to_string());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(invalid());
    }

    Ok(())
}

/// Budgets and fuel limits are plain currency amounts
pub fn validate_amount(amount: f64) -> Result<(), UserValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(UserValidationError::InvalidAmount);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("u1").is_ok());
        assert!(validate_user_id("Xk29fLq0aZ3bT8mN2pR7sV1wY4c2").is_ok());
        assert!(validate_user_id("driver_42-b").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let long_id = "a".repeat(129);
        assert_eq!(
            validate_user_id(&long_id),
            Err(UserValidationError::IdTooLong(128))
        );
    }

    #[test]
    fn test_user_id_invalid_character() {
        assert_eq!(
            validate_user_id("users/abc"),
            Err(UserValidationError::InvalidIdCharacter('/'))
        );
    }

    #[test]
    fn test_display_name() {
        assert!(validate_display_name("Ana Souza").is_ok());
        assert_eq!(
            validate_display_name("   "),
            Err(UserValidationError::EmptyDisplayName)
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@localhost").is_err());
    }

    #[test]
    fn test_amount() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(250.5).is_ok());
        assert_eq!(validate_amount(-1.0), Err(UserValidationError::InvalidAmount));
        assert_eq!(
            validate_amount(f64::NAN),
            Err(UserValidationError::InvalidAmount)
        );
    }
}
