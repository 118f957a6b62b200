//! Vault infrastructure: repositories and the access-controlled service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
pub use service::{CreateKeyRequest, VaultService};
