//! Vault API endpoints: the four key operations
//!
//! Create and list are team-targeted and take an explicit team id. Reveal
//! and delete are key-targeted; the owning team comes from the record
//! itself, never from the client.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyMetadata};
use crate::domain::team::TeamId;
use crate::infrastructure::vault::CreateKeyRequest;

/// Create the vault router
pub fn create_vault_router() -> Router<AppState> {
    Router::new()
        .route("/keys", post(create_key).get(list_keys))
        .route("/keys/{key_id}/reveal", post(reveal_key))
        .route("/keys/{key_id}", delete(delete_key))
}

/// Request to store a new key
#[derive(Debug, Deserialize)]
pub struct CreateKeyApiRequest {
    pub name: String,
    pub key: String,
    pub team_id: Uuid,
}

/// Query parameters for listing keys
#[derive(Debug, Deserialize)]
pub struct ListKeysQuery {
    pub team_id: Uuid,
}

/// Stored key response: metadata only, no secret material
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub team_id: String,
    pub created_at: String,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            name: key.name().to_string(),
            team_id: key.team_id().to_string(),
            created_at: key.created_at().to_rfc3339(),
        }
    }
}

/// List entry response
#[derive(Debug, Serialize)]
pub struct ApiKeyListEntry {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<&ApiKeyMetadata> for ApiKeyListEntry {
    fn from(meta: &ApiKeyMetadata) -> Self {
        Self {
            id: meta.id.to_string(),
            name: meta.name.clone(),
            created_by: meta.created_by.to_string(),
            created_at: meta.created_at.to_rfc3339(),
        }
    }
}

/// List keys response
#[derive(Debug, Serialize)]
pub struct ListKeysResponse {
    pub data: Vec<ApiKeyListEntry>,
}

/// Reveal response
#[derive(Debug, Serialize)]
pub struct RevealKeyResponse {
    pub data: String,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteKeyResponse {
    pub message: String,
}

/// POST /vault/keys
pub async fn create_key(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateKeyApiRequest>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(user_id = %user.id(), team_id = %request.team_id, "Storing API key");

    let key = state
        .vault_service
        .create_key(
            user.id(),
            CreateKeyRequest {
                name: request.name,
                key: request.key,
                team_id: TeamId::from(request.team_id),
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiKeyResponse::from(&key)))
}

/// GET /vault/keys?team_id=...
pub async fn list_keys(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<ListKeysQuery>,
) -> Result<Json<ListKeysResponse>, ApiError> {
    let keys = state
        .vault_service
        .list_keys(user.id(), TeamId::from(query.team_id))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListKeysResponse {
        data: keys.iter().map(ApiKeyListEntry::from).collect(),
    }))
}

/// POST /vault/keys/{key_id}/reveal
pub async fn reveal_key(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(key_id): Path<Uuid>,
) -> Result<Json<RevealKeyResponse>, ApiError> {
    let plaintext = state
        .vault_service
        .reveal_key(user.id(), ApiKeyId::from(key_id))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RevealKeyResponse { data: plaintext }))
}

/// DELETE /vault/keys/{key_id}
pub async fn delete_key(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(key_id): Path<Uuid>,
) -> Result<Json<DeleteKeyResponse>, ApiError> {
    state
        .vault_service
        .delete_key(user.id(), ApiKeyId::from(key_id))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DeleteKeyResponse {
        message: "API key deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_key_response_has_no_secret_fields() {
        let key = ApiKey::new(
            "svc",
            "Y2lwaGVydGV4dA==",
            "aXY=",
            TeamId::generate(),
            UserId::generate(),
        );

        let response = ApiKeyResponse::from(&key);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("encrypted_key"));
        assert!(!json.contains("Y2lwaGVydGV4dA"));
        assert!(!json.contains("\"iv\""));
    }

    #[test]
    fn test_list_entry_has_no_secret_fields() {
        let key = ApiKey::new(
            "svc",
            "Y2lwaGVydGV4dA==",
            "aXY=",
            TeamId::generate(),
            UserId::generate(),
        );

        let entry = ApiKeyListEntry::from(&key.metadata());
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("svc"));
        assert!(!json.contains("Y2lwaGVydGV4dA"));
        assert!(!json.contains("aXY"));
    }
}
