//! API key repository trait

use async_trait::async_trait;

use super::entity::{ApiKey, ApiKeyId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository for stored API keys
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + std::fmt::Debug {
    /// Get a key by ID, ciphertext included
    async fn get(&self, id: ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Persist a new key record
    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError>;

    /// List a team's keys, newest first
    async fn list_for_team(&self, team_id: TeamId) -> Result<Vec<ApiKey>, DomainError>;

    /// Delete a key by ID; returns whether a row was removed
    async fn delete(&self, id: ApiKeyId) -> Result<bool, DomainError>;
}
