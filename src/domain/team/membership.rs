//! Membership entity
//!
//! The existence of a membership row is the sole authorization fact: every
//! vault operation reduces to "does (user, team) have one".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::TeamId;
use crate::domain::user::UserId;

/// Membership of a user in a team
///
/// No per-membership role; all members have identical privileges over the
/// team's secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    id: Uuid,
    user_id: UserId,
    team_id: TeamId,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Create a new membership with a generated id
    pub fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            team_id,
            joined_at: Utc::now(),
        }
    }

    /// Reconstruct a membership from persisted fields
    pub fn from_parts(id: Uuid, user_id: UserId, team_id: TeamId, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            team_id,
            joined_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
