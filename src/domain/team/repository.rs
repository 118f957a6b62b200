//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamCode, TeamId};
use super::membership::Membership;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for teams and memberships
///
/// Memberships live behind the same trait because the only multi-row write
/// in the system, team-creation-with-creator, must span both relations in
/// one transaction.
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Find a team by its (normalized) invite code
    async fn find_by_code(&self, code: &TeamCode) -> Result<Option<Team>, DomainError>;

    /// Persist a team together with its creator's membership, atomically.
    ///
    /// A duplicate team code is a conflict. On success the creator is a
    /// member; a team row without a membership row must be unobservable.
    async fn create_with_creator(&self, team: Team) -> Result<Team, DomainError>;

    /// Check whether a user belongs to a team
    async fn is_member(&self, user_id: UserId, team_id: TeamId) -> Result<bool, DomainError>;

    /// Add a membership; a duplicate (user, team) pair is a conflict
    async fn add_member(&self, membership: Membership) -> Result<Membership, DomainError>;

    /// List the teams a user belongs to, oldest joined first
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Team>, DomainError>;

    /// Count memberships of a team
    async fn member_count(&self, team_id: TeamId) -> Result<usize, DomainError>;
}
