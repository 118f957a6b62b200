//! Team API endpoints

use axum::{
    extract::State,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamCode};
use crate::infrastructure::team::CreateTeamRequest;

/// Create the teams router
pub fn create_teams_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_team).get(list_teams))
        .route("/join", post(join_team))
}

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
}

/// Request to join a team by invite code
#[derive(Debug, Clone, Deserialize)]
pub struct JoinTeamRequest {
    pub code: String,
}

/// Team response
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub team_code: String,
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            team_code: team.team_code().to_string(),
            created_at: team.created_at().to_rfc3339(),
        }
    }
}

/// Create team response wrapper
#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    pub team: TeamResponse,
}

/// Join team response wrapper
#[derive(Debug, Serialize)]
pub struct JoinTeamResponse {
    pub message: String,
    pub team: TeamResponse,
}

/// List teams response
#[derive(Debug, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<Json<CreateTeamResponse>, ApiError> {
    debug!(user_id = %user.id(), "Creating team");

    let team = state
        .team_service
        .create_team(CreateTeamRequest { name: request.name }, user.id())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(CreateTeamResponse {
        team: TeamResponse::from(&team),
    }))
}

/// POST /teams/join
pub async fn join_team(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<JoinTeamRequest>,
) -> Result<Json<JoinTeamResponse>, ApiError> {
    // Normalizes to uppercase; malformed codes are a 400, not a lookup miss
    let code = TeamCode::new(request.code)
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("code"))?;

    let team = state
        .team_service
        .join_by_code(&code, user.id())
        .await
        .map_err(ApiError::from)?;

    debug!(user_id = %user.id(), team_id = %team.id(), "Joined team");

    Ok(Json(JoinTeamResponse {
        message: "Successfully joined team".to_string(),
        team: TeamResponse::from(&team),
    }))
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state
        .team_service
        .list_for_user(user.id())
        .await
        .map_err(ApiError::from)?;

    let team_responses: Vec<TeamResponse> = teams.iter().map(TeamResponse::from).collect();
    let total = team_responses.len();

    Ok(Json(ListTeamsResponse {
        teams: team_responses,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_team_response_includes_code() {
        let team = Team::new(
            "T1",
            TeamCode::new("AB12CD34").unwrap(),
            UserId::generate(),
        );

        let response = TeamResponse::from(&team);
        assert_eq!(response.name, "T1");
        assert_eq!(response.team_code, "AB12CD34");
    }
}
