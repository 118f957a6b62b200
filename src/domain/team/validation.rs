//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name must be at least {0} characters")]
    NameTooShort(usize),

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Team code must be between {0} and {1} characters")]
    InvalidCodeLength(usize, usize),

    #[error("Team code can only contain uppercase letters and digits")]
    InvalidCodeCharacters,
}

const MIN_TEAM_NAME_LENGTH: usize = 3;
const MAX_TEAM_NAME_LENGTH: usize = 50;
const MIN_TEAM_CODE_LENGTH: usize = 4;
const MAX_TEAM_CODE_LENGTH: usize = 12;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    let len = name.chars().count();

    if len < MIN_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooShort(MIN_TEAM_NAME_LENGTH));
    }

    if len > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an already-normalized (uppercase) team code
pub fn validate_team_code(code: &str) -> Result<(), TeamValidationError> {
    if code.len() < MIN_TEAM_CODE_LENGTH || code.len() > MAX_TEAM_CODE_LENGTH {
        return Err(TeamValidationError::InvalidCodeLength(
            MIN_TEAM_CODE_LENGTH,
            MAX_TEAM_CODE_LENGTH,
        ));
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(TeamValidationError::InvalidCodeCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("Ops").is_ok());
        assert!(validate_team_name("Platform Engineering").is_ok());
    }

    #[test]
    fn test_team_name_too_short() {
        assert_eq!(
            validate_team_name("ab"),
            Err(TeamValidationError::NameTooShort(3))
        );
        assert_eq!(
            validate_team_name(""),
            Err(TeamValidationError::NameTooShort(3))
        );
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(51);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(50))
        );
    }

    #[test]
    fn test_valid_team_code() {
        assert!(validate_team_code("AB12").is_ok());
        assert!(validate_team_code("DEADBEEF").is_ok());
        assert!(validate_team_code("A1B2C3D4E5F6").is_ok());
    }

    #[test]
    fn test_team_code_bad_length() {
        assert_eq!(
            validate_team_code("ABC"),
            Err(TeamValidationError::InvalidCodeLength(4, 12))
        );
        assert_eq!(
            validate_team_code("ABCDEF1234567"),
            Err(TeamValidationError::InvalidCodeLength(4, 12))
        );
    }

    #[test]
    fn test_team_code_bad_characters() {
        assert_eq!(
            validate_team_code("ab12cd34"),
            Err(TeamValidationError::InvalidCodeCharacters)
        );
        assert_eq!(
            validate_team_code("AB-2"),
            Err(TeamValidationError::InvalidCodeCharacters)
        );
    }
}
