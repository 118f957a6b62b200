//! In-memory team repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::team::{Membership, Team, TeamCode, TeamId, TeamRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of TeamRepository
///
/// A single RwLock guards teams and memberships together, which gives
/// create_with_creator the same all-or-nothing behavior the Postgres
/// transaction provides.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    teams: HashMap<TeamId, Team>,
    /// Index for code -> team ID lookup
    code_index: HashMap<TeamCode, TeamId>,
    memberships: Vec<Membership>,
}

impl InMemoryTeamRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.teams.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &TeamCode) -> Result<Option<Team>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .code_index
            .get(code)
            .and_then(|id| inner.teams.get(id))
            .cloned())
    }

    async fn create_with_creator(&self, team: Team) -> Result<Team, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.code_index.contains_key(team.team_code()) {
            return Err(DomainError::conflict(format!(
                "Team code '{}' already exists",
                team.team_code()
            )));
        }

        inner.code_index.insert(team.team_code().clone(), team.id());
        inner
            .memberships
            .push(Membership::new(team.created_by(), team.id()));
        inner.teams.insert(team.id(), team.clone());

        Ok(team)
    }

    async fn is_member(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .memberships
            .iter()
            .any(|m| m.user_id() == user_id && m.team_id() == team_id))
    }

    async fn add_member(&self, membership: Membership) -> Result<Membership, DomainError> {
        let mut inner = self.inner.write().await;

        let duplicate = inner
            .memberships
            .iter()
            .any(|m| m.user_id() == membership.user_id() && m.team_id() == membership.team_id());

        if duplicate {
            return Err(DomainError::conflict("Already a member of this team"));
        }

        inner.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Team>, DomainError> {
        let inner = self.inner.read().await;

        let mut joined: Vec<&Membership> = inner
            .memberships
            .iter()
            .filter(|m| m.user_id() == user_id)
            .collect();
        joined.sort_by_key(|m| m.joined_at());

        Ok(joined
            .into_iter()
            .filter_map(|m| inner.teams.get(&m.team_id()))
            .cloned()
            .collect())
    }

    async fn member_count(&self, team_id: TeamId) -> Result<usize, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .memberships
            .iter()
            .filter(|m| m.team_id() == team_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_team(code: &str, creator: UserId) -> Team {
        Team::new("Test Team", TeamCode::new(code).unwrap(), creator)
    }

    #[tokio::test]
    async fn test_create_with_creator_adds_membership() {
        let repo = InMemoryTeamRepository::new();
        let creator = UserId::generate();

        let team = repo
            .create_with_creator(make_team("AB12CD34", creator))
            .await
            .unwrap();

        assert!(repo.is_member(creator, team.id()).await.unwrap());
        assert_eq!(repo.member_count(team.id()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_conflict() {
        let repo = InMemoryTeamRepository::new();
        let creator = UserId::generate();

        repo.create_with_creator(make_team("AB12CD34", creator))
            .await
            .unwrap();

        let result = repo
            .create_with_creator(make_team("AB12CD34", UserId::generate()))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_by_code() {
        let repo = InMemoryTeamRepository::new();
        let creator = UserId::generate();
        let team = repo
            .create_with_creator(make_team("AB12CD34", creator))
            .await
            .unwrap();

        let code = TeamCode::new("AB12CD34").unwrap();
        let found = repo.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(found.id(), team.id());

        let missing = TeamCode::new("ZZZZ9999").unwrap();
        assert!(repo.find_by_code(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_member_rejects_duplicates() {
        let repo = InMemoryTeamRepository::new();
        let creator = UserId::generate();
        let joiner = UserId::generate();
        let team = repo
            .create_with_creator(make_team("AB12CD34", creator))
            .await
            .unwrap();

        repo.add_member(Membership::new(joiner, team.id()))
            .await
            .unwrap();

        let result = repo.add_member(Membership::new(joiner, team.id())).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.member_count(team.id()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let repo = InMemoryTeamRepository::new();
        let user = UserId::generate();

        let t1 = repo
            .create_with_creator(make_team("AB12CD34", user))
            .await
            .unwrap();
        let t2 = repo
            .create_with_creator(make_team("EF56AB78", UserId::generate()))
            .await
            .unwrap();
        repo.add_member(Membership::new(user, t2.id())).await.unwrap();

        let teams = repo.list_for_user(user).await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].id(), t1.id());
        assert_eq!(teams[1].id(), t2.id());
    }

    #[tokio::test]
    async fn test_non_member() {
        let repo = InMemoryTeamRepository::new();
        let team = repo
            .create_with_creator(make_team("AB12CD34", UserId::generate()))
            .await
            .unwrap();

        assert!(!repo.is_member(UserId::generate(), team.id()).await.unwrap());
    }
}
