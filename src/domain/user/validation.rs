//! User input validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email cannot exceed {0} characters")]
    EmailTooLong(usize),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Password cannot exceed {0} characters")]
    PasswordTooLong(usize),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an email address
///
/// Intentionally loose: one '@' with non-empty local part and a domain
/// containing a dot. Deliverability is the mail system's problem.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::InvalidEmail);
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(UserValidationError::InvalidEmail);
    }

    if email.chars().any(char::is_whitespace) || domain.starts_with('.') || domain.ends_with('.') {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("user+tag@example.io").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_invalid_email_format() {
        assert_eq!(
            validate_email("no-at-sign"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(validate_email("a@"), Err(UserValidationError::InvalidEmail));
        assert_eq!(
            validate_email("a@nodot"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("a b@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("a@.example.com"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("a@b@example.com"),
            Err(UserValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&long),
            Err(UserValidationError::EmailTooLong(254))
        );
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("longpass1").is_ok());
        assert!(validate_password("exactly8").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("short"),
            Err(UserValidationError::PasswordTooShort(8))
        );
        assert_eq!(
            validate_password(""),
            Err(UserValidationError::PasswordTooShort(8))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long = "a".repeat(129);
        assert_eq!(
            validate_password(&long),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
