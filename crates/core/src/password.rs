//! Password hashing and verification utilities.
//!
//! Old-password confirmation and new-password storage both go through these
//! Argon2id helpers, so the stored hash format stays uniform.

use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::{SettingsError, SettingsResult};

/// Hash a plaintext password with Argon2id using a random salt.
pub fn hash_password(password: &str) -> SettingsResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SettingsError::password_hash(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a plaintext password against an Argon2 hash string.
///
/// A mismatch yields [`SettingsError::InvalidOldPassword`]; a hash that
/// cannot be parsed yields [`SettingsError::PasswordHash`].
pub fn verify_password(password: &str, hash: &str) -> SettingsResult<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| SettingsError::password_hash(format!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| SettingsError::InvalidOldPassword)?;

    Ok(())
}
