//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_team_code, TeamValidationError};
use crate::domain::user::UserId;

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for TeamId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for TeamId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shareable invite code - uppercase alphanumeric, 4 to 12 characters
///
/// Normalized to uppercase on construction so lookups are exact matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamCode(String);

impl TeamCode {
    /// Create a code after normalization and validation
    pub fn new(code: impl Into<String>) -> Result<Self, TeamValidationError> {
        let code = code.into().trim().to_ascii_uppercase();
        validate_team_code(&code)?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamCode {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamCode> for String {
    fn from(code: TeamCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for TeamCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Unique invite code, the only join path
    team_code: TeamCode,
    /// User who created the team
    created_by: UserId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with a generated id
    pub fn new(name: impl Into<String>, team_code: TeamCode, created_by: UserId) -> Self {
        Self {
            id: TeamId::generate(),
            name: name.into(),
            team_code,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a team from persisted fields
    pub fn from_parts(
        id: TeamId,
        name: impl Into<String>,
        team_code: TeamCode,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team_code,
            created_by,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team_code(&self) -> &TeamCode {
        &self.team_code
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_code_normalizes_to_uppercase() {
        let code = TeamCode::new("ab12cd34").unwrap();
        assert_eq!(code.as_str(), "AB12CD34");
    }

    #[test]
    fn test_team_code_trims_whitespace() {
        let code = TeamCode::new("  ab12cd34  ").unwrap();
        assert_eq!(code.as_str(), "AB12CD34");
    }

    #[test]
    fn test_team_code_invalid() {
        assert!(TeamCode::new("").is_err());
        assert!(TeamCode::new("abc").is_err());
        assert!(TeamCode::new("toolongforacode").is_err());
        assert!(TeamCode::new("AB-12").is_err());
    }

    #[test]
    fn test_team_creation() {
        let code = TeamCode::new("AB12CD34").unwrap();
        let creator = UserId::generate();
        let team = Team::new("Platform", code.clone(), creator);

        assert_eq!(team.name(), "Platform");
        assert_eq!(team.team_code(), &code);
        assert_eq!(team.created_by(), creator);
    }

    #[test]
    fn test_team_code_serde_normalizes() {
        let code: TeamCode = serde_json::from_str("\"ab12cd34\"").unwrap();
        assert_eq!(code.as_str(), "AB12CD34");

        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"AB12CD34\"");
    }
}
