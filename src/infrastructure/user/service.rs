//! User service for registration and authentication

use std::sync::Arc;

use tracing::debug;

use crate::domain::user::{validate_email, validate_password, User, UserId, UserRepository, UserRole};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// User service for registration and login checks
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict("Email already exists"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(&request.email, password_hash, UserRole::User);

        debug!(user_id = %user.id(), "Registering user");

        self.repository.create(user).await
    }

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password both return None; the caller turns
    /// that into one generic message so accounts cannot be enumerated.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }
}
