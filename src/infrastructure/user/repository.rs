//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if email_index.contains_key(user.email()) {
            return Err(DomainError::conflict("Email already exists"));
        }

        email_index.insert(user.email().to_string(), user.id());
        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let email_index = self.email_index.read().await;
        Ok(email_index.contains_key(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("a@x.com", "hash", UserRole::User);
        let id = user.id();

        repo.create(user).await.unwrap();

        let fetched = repo.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("a@x.com", "hash", UserRole::User))
            .await
            .unwrap();

        let fetched = repo.get_by_email("a@x.com").await.unwrap();
        assert!(fetched.is_some());

        let missing = repo.get_by_email("b@x.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("a@x.com", "hash1", UserRole::User))
            .await
            .unwrap();

        let result = repo.create(User::new("a@x.com", "hash2", UserRole::User)).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_email_exists() {
        let repo = InMemoryUserRepository::new();

        assert!(!repo.email_exists("a@x.com").await.unwrap());

        repo.create(User::new("a@x.com", "hash", UserRole::User))
            .await
            .unwrap();

        assert!(repo.email_exists("a@x.com").await.unwrap());
    }
}
