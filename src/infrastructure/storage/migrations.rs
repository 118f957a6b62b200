//! Database migrations
//!
//! Idempotent schema setup run at startup. Uniqueness constraints here are
//! the sole concurrency guard against duplicate creation races: email,
//! team code, and (user, team) membership pairs.

use sqlx::PgPool;

use crate::domain::DomainError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        team_code TEXT NOT NULL UNIQUE,
        created_by UUID NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_members (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id),
        team_id UUID NOT NULL REFERENCES teams(id),
        joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (user_id, team_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS api_keys (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        encrypted_key TEXT NOT NULL,
        iv TEXT NOT NULL,
        team_id UUID NOT NULL REFERENCES teams(id),
        created_by UUID NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_team_members_user ON team_members(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_api_keys_team ON api_keys(team_id)",
];

/// Run all schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DomainError::storage(format!("Migration failed: {}", e)))?;
    }

    tracing::info!("Database schema is up to date");

    Ok(())
}
