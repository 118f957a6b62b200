//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<ApiKeyId, ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, id: ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.get(&id).cloned())
    }

    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;
        keys.insert(key.id(), key.clone());
        Ok(key)
    }

    async fn list_for_team(&self, team_id: TeamId) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        let mut result: Vec<ApiKey> = keys
            .values()
            .filter(|k| k.team_id() == team_id)
            .cloned()
            .collect();

        // Newest first
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(result)
    }

    async fn delete(&self, id: ApiKeyId) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        Ok(keys.remove(&id).is_some())
    }
}
