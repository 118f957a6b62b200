//! API middleware

mod user_auth;

pub use user_auth::{extract_token, RequireUser, AUTH_COOKIE};
