//! Application state for shared services

use std::sync::Arc;

use sqlx::PgPool;

use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::UserService;
use crate::infrastructure::vault::VaultService;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
    pub vault_service: Arc<VaultService>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    /// Database pool for readiness checks; None when running on in-memory
    /// repositories (tests)
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        user_service: Arc<UserService>,
        team_service: Arc<TeamService>,
        vault_service: Arc<VaultService>,
        jwt_service: Arc<dyn JwtGenerator>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            user_service,
            team_service,
            vault_service,
            jwt_service,
            pool,
        }
    }
}
