use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::teams;
use super::vault;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (no auth required for register/login)
        .nest("/auth", auth::create_auth_router())
        // Team management
        .nest("/teams", teams::create_teams_router())
        // Vault operations
        .nest("/vault", vault::create_vault_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
