//! Vault operations: the access-controlled CRUD surface over secrets
//!
//! Every operation runs the same sequence: validate input, authorize via
//! membership, act, return a typed result. Reveal and delete fetch the
//! record first and authorize against the record's own team - the caller
//! never names the team for those two, so a client-supplied team id can
//! never widen access.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::api_key::{
    validate_key_name, validate_key_value, ApiKey, ApiKeyId, ApiKeyMetadata, ApiKeyRepository,
};
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::crypto::EncryptionEnvelope;

/// Request for storing a new key
#[derive(Debug, Clone)]
pub struct CreateKeyRequest {
    pub name: String,
    pub key: String,
    pub team_id: TeamId,
}

/// Vault service combining membership authorization with the envelope
pub struct VaultService {
    keys: Arc<dyn ApiKeyRepository>,
    teams: Arc<dyn TeamRepository>,
    envelope: Arc<EncryptionEnvelope>,
}

impl std::fmt::Debug for VaultService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultService")
            .field("keys", &self.keys)
            .field("teams", &self.teams)
            .finish()
    }
}

impl VaultService {
    /// Create a new vault service
    pub fn new(
        keys: Arc<dyn ApiKeyRepository>,
        teams: Arc<dyn TeamRepository>,
        envelope: Arc<EncryptionEnvelope>,
    ) -> Self {
        Self {
            keys,
            teams,
            envelope,
        }
    }

    /// Store a new secret for a team.
    ///
    /// The plaintext is encrypted immediately and dropped; only the
    /// envelope output is persisted.
    pub async fn create_key(
        &self,
        user_id: UserId,
        request: CreateKeyRequest,
    ) -> Result<ApiKey, DomainError> {
        validate_key_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_key_value(&request.key).map_err(|e| DomainError::validation(e.to_string()))?;

        self.authorize_member(user_id, request.team_id).await?;

        let secret = self.envelope.encrypt(&request.key).map_err(|e| {
            error!("Envelope encryption failed: {}", e);
            e
        })?;

        let key = ApiKey::new(
            &request.name,
            secret.ciphertext,
            secret.iv,
            request.team_id,
            user_id,
        );

        info!(key_id = %key.id(), team_id = %request.team_id, "Stored API key");

        self.keys.create(key).await
    }

    /// List a team's keys as metadata-only projections, newest first
    pub async fn list_keys(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Vec<ApiKeyMetadata>, DomainError> {
        self.authorize_member(user_id, team_id).await?;

        let keys = self.keys.list_for_team(team_id).await?;

        Ok(keys.iter().map(ApiKey::metadata).collect())
    }

    /// Decrypt a stored secret for display.
    ///
    /// Transient: the plaintext goes to the caller and nowhere else; every
    /// reveal decrypts again.
    pub async fn reveal_key(&self, user_id: UserId, key_id: ApiKeyId) -> Result<String, DomainError> {
        let key = self.fetch_key(key_id).await?;

        self.authorize_record_access(user_id, &key, "reveal").await?;

        debug!(key_id = %key_id, "Revealing API key");

        self.envelope
            .decrypt(key.encrypted_key(), key.iv())
            .map_err(|e| {
                error!(key_id = %key_id, "Envelope decryption failed: {}", e);
                e
            })
    }

    /// Permanently remove a stored key. No soft delete, no undo.
    pub async fn delete_key(&self, user_id: UserId, key_id: ApiKeyId) -> Result<(), DomainError> {
        let key = self.fetch_key(key_id).await?;

        self.authorize_record_access(user_id, &key, "delete").await?;

        let removed = self.keys.delete(key_id).await?;

        if !removed {
            // Raced with a concurrent delete; the record is gone either way
            return Err(DomainError::not_found("API key not found"));
        }

        info!(key_id = %key_id, team_id = %key.team_id(), "Deleted API key");

        Ok(())
    }

    /// Membership gate for team-targeted operations
    async fn authorize_member(&self, user_id: UserId, team_id: TeamId) -> Result<(), DomainError> {
        if self.teams.is_member(user_id, team_id).await? {
            return Ok(());
        }

        Err(DomainError::forbidden("You are not a member of this team"))
    }

    /// Fetch-by-id step for keyed operations: absence is 404, before any
    /// authorization question is asked.
    async fn fetch_key(&self, key_id: ApiKeyId) -> Result<ApiKey, DomainError> {
        self.keys
            .get(key_id)
            .await?
            .ok_or_else(|| DomainError::not_found("API key not found"))
    }

    /// Authorization step for keyed operations, against the record's own
    /// team id.
    async fn authorize_record_access(
        &self,
        user_id: UserId,
        key: &ApiKey,
        action: &str,
    ) -> Result<(), DomainError> {
        if self.teams.is_member(user_id, key.team_id()).await? {
            return Ok(());
        }

        Err(DomainError::forbidden(format!(
            "You do not have permission to {} this key",
            action
        )))
    }
}
