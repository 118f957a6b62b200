//! Authentication API endpoints
//!
//! Registration, login, logout, and current-user info. Login and register
//! return the token in the body for bearer-token callers and set the
//! HTTP-only session cookie for browser flows; both transports resolve to
//! the same identity downstream.

use axum::{
    extract::State,
    http::header::{HeaderName, SET_COOKIE},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{RequireUser, AUTH_COOKIE};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::RegisterRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_current_user))
}

/// Register request
#[derive(Debug, Deserialize)]
pub struct RegisterApiRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login/register response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

/// Response body plus the Set-Cookie header carrying the session token
type SessionResponse = (AppendHeaders<[(HeaderName, String); 1]>, Json<AuthResponse>);

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterApiRequest>,
) -> Result<SessionResponse, ApiError> {
    let user = state
        .user_service
        .register(RegisterRequest {
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(ApiError::from)?;

    issue_session(&state, &user)
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<SessionResponse, ApiError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    // One generic message for unknown email and wrong password alike
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    issue_session(&state, &user)
}

/// Logout (client-side only for stateless JWT)
///
/// POST /auth/logout
///
/// The token itself stays valid until expiry; this clears the cookie and
/// exists for API symmetry.
pub async fn logout(_user: RequireUser) -> impl IntoResponse {
    let clear_cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", AUTH_COOKIE);

    (
        AppendHeaders([(SET_COOKIE, clear_cookie)]),
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Get current authenticated user
///
/// GET /auth/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_user(&user)))
}

/// Mint a token and build the shared login/register response
fn issue_session(state: &AppState, user: &User) -> Result<SessionResponse, ApiError> {
    let token = state.jwt_service.generate(user).map_err(ApiError::from)?;

    let expiration_days = state.jwt_service.expiration_days() as i64;
    let expires_at = Utc::now() + Duration::days(expiration_days);

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        AUTH_COOKIE,
        token,
        expiration_days * 24 * 60 * 60
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: UserResponse::from_user(user),
            expires_at: expires_at.to_rfc3339(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User::new("a@x.com", "secret-hash", UserRole::User);
        let response = UserResponse::from_user(&user);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("secret-hash"));
    }
}
