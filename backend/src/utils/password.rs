//! Password hashing helpers.
//!
//! bcrypt with a random salt per call; the same input hashes to a different
//! digest each time. Plaintext passwords are never persisted or logged.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
}

/// Checks a plaintext password against a stored digest.
pub fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    verify(password, password_hash)
        .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
}
