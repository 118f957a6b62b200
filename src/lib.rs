//! Team Vault API
//!
//! A team-scoped secrets vault: users register, form or join teams via a
//! shared invite code, and store API keys that are encrypted at rest and
//! only decrypted on explicit reveal. Membership in a team is the sole
//! authorization fact for every vault operation.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::crypto::EncryptionEnvelope;
use infrastructure::storage::run_migrations;
use infrastructure::team::{PostgresTeamRepository, TeamService};
use infrastructure::user::{Argon2Hasher, PostgresUserRepository, UserService};
use infrastructure::vault::{PostgresApiKeyRepository, VaultService};

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
///
/// Fails fast when the signing secret or the encryption key is missing:
/// running with a degraded or default key is worse than not starting.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pg_pool = sqlx::PgPool::connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
    info!("PostgreSQL connection established");

    run_migrations(&pg_pool).await?;

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        require_jwt_secret(config)?,
        config.auth.token_expiration_days,
    )));

    let envelope = Arc::new(EncryptionEnvelope::from_base64(&require_encryption_key(
        config,
    )?)?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let password_hasher = Arc::new(Argon2Hasher::new());
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let team_repository = Arc::new(PostgresTeamRepository::new(pg_pool.clone()));
    let team_service = Arc::new(TeamService::new(team_repository.clone()));

    let api_key_repository = Arc::new(PostgresApiKeyRepository::new(pg_pool.clone()));
    let vault_service = Arc::new(VaultService::new(
        api_key_repository,
        team_repository,
        envelope,
    ));

    Ok(AppState::new(
        user_service,
        team_service,
        vault_service,
        jwt_service,
        Some(pg_pool),
    ))
}

/// Resolve the JWT signing secret from config or environment
fn require_jwt_secret(config: &AppConfig) -> anyhow::Result<String> {
    config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "JWT signing secret is required. Set auth.jwt_secret in the config \
                 file or the JWT_SECRET environment variable."
            )
        })
}

/// Resolve the base64-encoded envelope key from config or environment
fn require_encryption_key(config: &AppConfig) -> anyhow::Result<String> {
    config
        .encryption
        .key
        .clone()
        .or_else(|| std::env::var("ENCRYPTION_KEY").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Encryption key is required. Set encryption.key in the config file \
                 or the ENCRYPTION_KEY environment variable (base64, 32 bytes or \
                 longer once decoded)."
            )
        })
}
