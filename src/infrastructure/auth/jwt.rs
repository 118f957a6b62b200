//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::str::FromStr;

use crate::domain::user::{User, UserId, UserRole};
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// User role
    pub role: UserRole,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_days: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(expiration_days as i64);

        Self {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the user ID out of the subject claim
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::from_str(&self.sub)
            .map_err(|_| DomainError::unauthenticated("Invalid or expired token"))
    }
}

/// Configuration for the JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in days
    pub expiration_days: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_days", &self.expiration_days)
            .finish()
    }
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_days: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_days,
        }
    }
}

/// Trait for identity token operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a signed token for a user
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Validate a token and return its claims.
    ///
    /// Bad signature, expiry, and malformed input all collapse to the same
    /// unauthenticated outcome; the distinction is not surfaced.
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Token lifetime in days
    fn expiration_days(&self) -> u64;
}

/// HS256 JWT service over a process-wide secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_days);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::unauthenticated("Invalid or expired token"))?;

        Ok(token_data.claims)
    }

    fn expiration_days(&self) -> u64 {
        self.config.expiration_days
    }
}
