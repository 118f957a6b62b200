//! Cryptographic infrastructure

mod envelope;

pub use envelope::{EncryptedSecret, EncryptionEnvelope};
