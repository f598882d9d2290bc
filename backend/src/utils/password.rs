//! Salted one-way password hashing.
//!
//! Digests are bcrypt strings that embed their own salt and cost, so
//! verification needs nothing but the stored digest.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};

/// Work factor used when no cost is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> ServiceResult<Self> {
        if !(4..=31).contains(&cost) {
            return Err(ServiceError::internal_error(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                cost
            )));
        }
        Ok(Self { cost })
    }

    /// Hashes `plaintext` with a freshly generated salt.
    ///
    /// Only the first 72 bytes of `plaintext` are significant.
    ///
    /// # Errors
    /// Returns `ServiceError` if hashing fails
    pub fn hash(&self, plaintext: &str) -> ServiceResult<String> {
        hash(plaintext, self.cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Checks `plaintext` against a stored digest.
    ///
    /// Malformed or empty digests never match.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        if digest.is_empty() {
            return false;
        }
        verify(plaintext, digest).unwrap_or(false)
    }
}
