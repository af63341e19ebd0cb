//! Credential Store
//! Mission: One-way password hashing, never plaintext at rest

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hash a password with bcrypt (salted, tunable work factor).
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, DEFAULT_COST).context("Failed to hash password")
}

/// Check a password against a stored bcrypt hash.
///
/// Returns false both on mismatch and on a malformed hash; a corrupt
/// credential row must read as "wrong password", not a server error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
