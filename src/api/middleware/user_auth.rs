//! User authentication middleware using JWT tokens
//!
//! Two transports resolve through the same verification logic: the
//! `Authorization: Bearer` header for programmatic callers and the
//! HTTP-only `auth_token` cookie for browser flows. The rest of the API
//! never knows which one carried the token.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Name of the session cookie set by login/register
pub const AUTH_COOKIE: &str = "auth_token";

/// Extractor that requires a valid identity token
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;

        debug!("Validating identity token");

        let claims = state
            .jwt_service
            .validate(&token)
            .map_err(ApiError::from)?;

        let user_id = claims.user_id().map_err(ApiError::from)?;

        let user = state
            .user_service
            .get(user_id)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(RequireUser(user))
    }
}

/// Extract a token from the Authorization header or the session cookie
pub fn extract_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(token) = bearer_token(headers) {
        return Ok(token);
    }

    if let Some(token) = cookie_token(headers) {
        return Ok(token);
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' \
         or the session cookie",
    ))
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

fn cookie_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let cookie_str = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in cookie_str.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };

        if name == AUTH_COOKIE && !value.is_empty() {
            return Some(value.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        let result = extract_token(&headers);
        assert_eq!(result.unwrap(), "eyJhbGciOiJIUzI1NiJ9.test");
    }

    #[test]
    fn test_extract_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; auth_token=tok123; other=1".parse().unwrap(),
        );

        let result = extract_token(&headers);
        assert_eq!(result.unwrap(), "tok123");
    }

    #[test]
    fn test_bearer_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(header::COOKIE, "auth_token=from-cookie".parse().unwrap());

        let result = extract_token(&headers);
        assert_eq!(result.unwrap(), "from-header");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let result = extract_token(&headers);
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_auth_scheme_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let result = extract_token(&headers);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_cookie_pairs_are_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "garbage; auth_token=tok123".parse().unwrap(),
        );

        let result = extract_token(&headers);
        assert_eq!(result.unwrap(), "tok123");
    }

    #[test]
    fn test_other_cookies_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "session=abc; tracking=xyz".parse().unwrap(),
        );

        let result = extract_token(&headers);
        assert!(result.is_err());
    }

    #[test]
    fn test_trimmed_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        let result = extract_token(&headers);
        assert_eq!(result.unwrap(), "token-with-spaces");
    }
}
