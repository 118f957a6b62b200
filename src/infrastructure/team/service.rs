//! Team service: creation, joining, and the membership check

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::domain::team::{
    validate_team_name, Membership, Team, TeamCode, TeamId, TeamRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Invite codes are 4 random bytes, hex-encoded and uppercased
const CODE_RANDOM_BYTES: usize = 4;

/// Attempts before giving up on a colliding invite code. The code space is
/// only 16^8, so collisions at scale are not hypothetical.
const CODE_GENERATION_ATTEMPTS: u32 = 3;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Team service over the team/membership repository
#[derive(Debug)]
pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        Self { repository }
    }

    /// Create a team together with its creator's membership.
    ///
    /// Retries with a fresh invite code if the generated one collides with
    /// an existing team; the storage uniqueness constraint is the arbiter.
    pub async fn create_team(
        &self,
        request: CreateTeamRequest,
        creator: UserId,
    ) -> Result<Team, DomainError> {
        validate_team_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut last_conflict = None;

        for attempt in 1..=CODE_GENERATION_ATTEMPTS {
            let code = generate_team_code();
            let team = Team::new(&request.name, code, creator);

            match self.repository.create_with_creator(team).await {
                Ok(team) => {
                    info!(team_id = %team.id(), "Created team");
                    return Ok(team);
                }
                Err(DomainError::Conflict { message }) => {
                    warn!(attempt, "Invite code collision, regenerating");
                    last_conflict = Some(message);
                }
                Err(other) => return Err(other),
            }
        }

        Err(DomainError::conflict(last_conflict.unwrap_or_else(|| {
            "Could not generate a unique team code".to_string()
        })))
    }

    /// Join a team via its invite code.
    ///
    /// Joining a team the user already belongs to is a conflict, not a
    /// silent success; the membership row is never duplicated.
    pub async fn join_by_code(&self, code: &TeamCode, user_id: UserId) -> Result<Team, DomainError> {
        let team = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Invalid or expired team code"))?;

        if self.repository.is_member(user_id, team.id()).await? {
            return Err(DomainError::conflict("Already a member of this team"));
        }

        self.repository
            .add_member(Membership::new(user_id, team.id()))
            .await?;

        debug!(team_id = %team.id(), "User joined team");

        Ok(team)
    }

    /// The authorization primitive: does the user belong to the team
    pub async fn is_member(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
        self.repository.is_member(user_id, team_id).await
    }

    /// Get a team by ID
    pub async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        self.repository.get(id).await
    }

    /// List the teams a user belongs to
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Team>, DomainError> {
        self.repository.list_for_user(user_id).await
    }
}

/// Generate an invite code: 4 random bytes as 8 uppercase hex characters
fn generate_team_code() -> TeamCode {
    let mut bytes = [0u8; CODE_RANDOM_BYTES];
    OsRng.fill_bytes(&mut bytes);

    TeamCode::new(hex::encode_upper(bytes)).expect("hex encoding always yields a valid code")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::team::repository::InMemoryTeamRepository;

    fn create_service() -> TeamService {
        TeamService::new(Arc::new(InMemoryTeamRepository::new()))
    }

    fn make_request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_generated_code_shape() {
        let code = generate_team_code();

        assert_eq!(code.as_str().len(), 8);
        assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: std::collections::HashSet<String> = (0..32)
            .map(|_| generate_team_code().as_str().to_string())
            .collect();

        assert!(codes.len() > 1);
    }

    #[tokio::test]
    async fn test_create_team_makes_creator_a_member() {
        let service = create_service();
        let creator = UserId::generate();

        let team = service.create_team(make_request("T1"), creator).await.unwrap();

        assert!(service.is_member(creator, team.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_team_invalid_name() {
        let service = create_service();

        let result = service
            .create_team(make_request("ab"), UserId::generate())
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service
            .create_team(make_request(&"a".repeat(51)), UserId::generate())
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_join_by_code() {
        let service = create_service();
        let creator = UserId::generate();
        let joiner = UserId::generate();

        let team = service.create_team(make_request("T1"), creator).await.unwrap();

        let joined = service
            .join_by_code(team.team_code(), joiner)
            .await
            .unwrap();

        assert_eq!(joined.id(), team.id());
        assert!(service.is_member(joiner, team.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_join_unknown_code() {
        let service = create_service();
        let code = TeamCode::new("ZZZZ9999").unwrap();

        let result = service.join_by_code(&code, UserId::generate()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_join_twice_is_conflict() {
        let service = create_service();
        let creator = UserId::generate();
        let joiner = UserId::generate();

        let team = service.create_team(make_request("T1"), creator).await.unwrap();

        service.join_by_code(team.team_code(), joiner).await.unwrap();

        let result = service.join_by_code(team.team_code(), joiner).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_creator_joining_own_team_is_conflict() {
        let service = create_service();
        let creator = UserId::generate();

        let team = service.create_team(make_request("T1"), creator).await.unwrap();

        let result = service.join_by_code(team.team_code(), creator).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    /// Repository that reports a code conflict a fixed number of times
    /// before accepting, to exercise the regeneration loop.
    #[derive(Debug)]
    struct CollidingRepository {
        inner: InMemoryTeamRepository,
        conflicts_left: std::sync::Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl TeamRepository for CollidingRepository {
        async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
            self.inner.get(id).await
        }

        async fn find_by_code(&self, code: &TeamCode) -> Result<Option<Team>, DomainError> {
            self.inner.find_by_code(code).await
        }

        async fn create_with_creator(&self, team: Team) -> Result<Team, DomainError> {
            {
                let mut left = self.conflicts_left.lock().unwrap();

                if *left > 0 {
                    *left -= 1;
                    return Err(DomainError::conflict("Team code already exists"));
                }
            }

            self.inner.create_with_creator(team).await
        }

        async fn is_member(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError> {
            self.inner.is_member(user_id, team_id).await
        }

        async fn add_member(&self, membership: Membership) -> Result<Membership, DomainError> {
            self.inner.add_member(membership).await
        }

        async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Team>, DomainError> {
            self.inner.list_for_user(user_id).await
        }

        async fn member_count(&self, team_id: TeamId) -> Result<usize, DomainError> {
            self.inner.member_count(team_id).await
        }
    }

    #[tokio::test]
    async fn test_code_collision_retries_then_succeeds() {
        let repo = CollidingRepository {
            inner: InMemoryTeamRepository::new(),
            conflicts_left: std::sync::Mutex::new(2),
        };
        let service = TeamService::new(Arc::new(repo));

        let team = service
            .create_team(make_request("T1"), UserId::generate())
            .await
            .unwrap();
        assert_eq!(team.name(), "T1");
    }

    #[tokio::test]
    async fn test_code_collision_exhausts_attempts() {
        let repo = CollidingRepository {
            inner: InMemoryTeamRepository::new(),
            conflicts_left: std::sync::Mutex::new(10),
        };
        let service = TeamService::new(Arc::new(repo));

        let result = service
            .create_team(make_request("T1"), UserId::generate())
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }
}
