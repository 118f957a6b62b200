//! Stored API key entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// API key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(Uuid);

impl ApiKeyId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ApiKeyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ApiKeyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team's stored secret
///
/// Holds only the envelope output; the plaintext value exists transiently
/// during create and reveal and is never persisted. Ciphertext and IV are
/// written together and excluded from every serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier
    id: ApiKeyId,
    /// Human-readable name
    name: String,
    /// Base64 ciphertext - never serialized
    #[serde(skip_serializing)]
    encrypted_key: String,
    /// Base64 initialization vector - never serialized
    #[serde(skip_serializing)]
    iv: String,
    /// Owning team; governs authorization for reveal and delete
    team_id: TeamId,
    /// User who stored the key (display-only, not re-checked later)
    created_by: UserId,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Create a new record from envelope output
    pub fn new(
        name: impl Into<String>,
        encrypted_key: impl Into<String>,
        iv: impl Into<String>,
        team_id: TeamId,
        created_by: UserId,
    ) -> Self {
        Self {
            id: ApiKeyId::generate(),
            name: name.into(),
            encrypted_key: encrypted_key.into(),
            iv: iv.into(),
            team_id,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a record from persisted fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ApiKeyId,
        name: impl Into<String>,
        encrypted_key: impl Into<String>,
        iv: impl Into<String>,
        team_id: TeamId,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            encrypted_key: encrypted_key.into(),
            iv: iv.into(),
            team_id,
            created_by,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> ApiKeyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn encrypted_key(&self) -> &str {
        &self.encrypted_key
    }

    pub fn iv(&self) -> &str {
        &self.iv
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Metadata-only projection for listing
    pub fn metadata(&self) -> ApiKeyMetadata {
        ApiKeyMetadata {
            id: self.id,
            name: self.name.clone(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// What list operations return: no ciphertext, no IV, by construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyMetadata {
    pub id: ApiKeyId,
    pub name: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_key() -> ApiKey {
        ApiKey::new(
            "prod-stripe",
            "Y2lwaGVydGV4dA==",
            "aXZpdml2aXZpdml2aXY=",
            TeamId::generate(),
            UserId::generate(),
        )
    }

    #[test]
    fn test_api_key_creation() {
        let key = create_test_key();

        assert_eq!(key.name(), "prod-stripe");
        assert_eq!(key.encrypted_key(), "Y2lwaGVydGV4dA==");
        assert_eq!(key.iv(), "aXZpdml2aXZpdml2aXY=");
    }

    #[test]
    fn test_serialization_excludes_ciphertext_and_iv() {
        let key = create_test_key();

        let json = serde_json::to_string(&key).unwrap();
        assert!(!json.contains("encrypted_key"));
        assert!(!json.contains("Y2lwaGVydGV4dA"));
        assert!(!json.contains("\"iv\""));
        assert!(!json.contains("aXZpdml2"));
    }

    #[test]
    fn test_metadata_projection() {
        let key = create_test_key();
        let meta = key.metadata();

        assert_eq!(meta.id, key.id());
        assert_eq!(meta.name, key.name());
        assert_eq!(meta.created_by, key.created_by());

        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("encrypted_key"));
        assert!(!json.contains("iv"));
    }
}
