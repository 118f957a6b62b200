//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository};
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of ApiKeyRepository
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn get(&self, id: ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, encrypted_key, iv, team_id, created_by, created_at
            FROM api_keys
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get API key: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_api_key(&row))),
            None => Ok(None),
        }
    }

    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, name, encrypted_key, iv, team_id, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(key.id().as_uuid())
        .bind(key.name())
        .bind(key.encrypted_key())
        .bind(key.iv())
        .bind(key.team_id().as_uuid())
        .bind(key.created_by().as_uuid())
        .bind(key.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create API key: {}", e)))?;

        Ok(key)
    }

    async fn list_for_team(&self, team_id: TeamId) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, encrypted_key, iv, team_id, created_by, created_at
            FROM api_keys
            WHERE team_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(team_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list API keys: {}", e)))?;

        Ok(rows.iter().map(row_to_api_key).collect())
    }

    async fn delete(&self, id: ApiKeyId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API key: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_api_key(row: &sqlx::postgres::PgRow) -> ApiKey {
    let id: uuid::Uuid = row.get("id");
    let name: String = row.get("name");
    let encrypted_key: String = row.get("encrypted_key");
    let iv: String = row.get("iv");
    let team_id: uuid::Uuid = row.get("team_id");
    let created_by: uuid::Uuid = row.get("created_by");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    ApiKey::from_parts(
        ApiKeyId::from(id),
        name,
        encrypted_key,
        iv,
        TeamId::from(team_id),
        UserId::from(created_by),
        created_at,
    )
}
