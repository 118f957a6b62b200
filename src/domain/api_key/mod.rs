//! API key domain module
//!
//! A stored key belongs to exactly one team and carries only the encrypted
//! form of its value. List projections exclude the ciphertext and IV.

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId, ApiKeyMetadata};
pub use repository::ApiKeyRepository;
pub use validation::{validate_key_name, validate_key_value, ApiKeyValidationError};
