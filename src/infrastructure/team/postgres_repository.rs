//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::team::{Membership, Team, TeamCode, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, team_code, created_by, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_code(&self, code: &TeamCode) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, team_code, created_by, created_at
            FROM teams
            WHERE team_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find team by code: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_with_creator(&self, team: Team) -> Result<Team, DomainError> {
        // Team row and creator membership commit together or not at all: a
        // team with zero members must never be observable.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, name, team_code, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(team.id().as_uuid())
        .bind(team.name())
        .bind(team.team_code().as_str())
        .bind(team.created_by().as_uuid())
        .bind(team.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!("Team code '{}' already exists", team.team_code()))
            } else {
                DomainError::storage(format!("Failed to create team: {}", e))
            }
        })?;

        let membership = Membership::new(team.created_by(), team.id());

        sqlx::query(
            r#"
            INSERT INTO team_members (id, user_id, team_id, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(membership.id())
        .bind(membership.user_id().as_uuid())
        .bind(membership.team_id().as_uuid())
        .bind(membership.joined_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create membership: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit team creation: {}", e)))?;

        Ok(team)
    }

    async fn is_member(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM team_members WHERE user_id = $1 AND team_id = $2)",
        )
        .bind(user_id.as_uuid())
        .bind(team_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check membership: {}", e)))?;

        Ok(exists)
    }

    async fn add_member(&self, membership: Membership) -> Result<Membership, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO team_members (id, user_id, team_id, joined_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(membership.id())
        .bind(membership.user_id().as_uuid())
        .bind(membership.team_id().as_uuid())
        .bind(membership.joined_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("Already a member of this team")
            } else {
                DomainError::storage(format!("Failed to add member: {}", e))
            }
        })?;

        Ok(membership)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.team_code, t.created_by, t.created_at
            FROM teams t
            JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        let mut teams = Vec::with_capacity(rows.len());

        for row in rows {
            teams.push(row_to_team(&row)?);
        }

        Ok(teams)
    }

    async fn member_count(&self, team_id: TeamId) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
            .bind(team_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count members: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let name: String = row.get("name");
    let team_code: String = row.get("team_code");
    let created_by: uuid::Uuid = row.get("created_by");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let team_code = TeamCode::new(team_code)
        .map_err(|e| DomainError::storage(format!("Invalid team code in database: {}", e)))?;

    Ok(Team::from_parts(
        TeamId::from(id),
        name,
        team_code,
        UserId::from(created_by),
        created_at,
    ))
}
