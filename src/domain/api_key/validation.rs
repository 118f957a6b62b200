//! API key input validation

use thiserror::Error;

/// Errors that can occur during API key validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("Key name cannot be empty")]
    EmptyName,

    #[error("Key name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Key value cannot be empty")]
    EmptyValue,
}

const MAX_KEY_NAME_LENGTH: usize = 100;

/// Validate a key name
pub fn validate_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.chars().count() > MAX_KEY_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_KEY_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a plaintext key value
pub fn validate_key_value(value: &str) -> Result<(), ApiKeyValidationError> {
    if value.is_empty() {
        return Err(ApiKeyValidationError::EmptyValue);
    }

    Ok(())
}
