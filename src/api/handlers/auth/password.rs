//! Password hashing and verification.
//!
//! Digests are argon2 PHC strings with a random per-call salt, so hashing
//! the same input twice never yields the same digest. Verification parses
//! the salt and parameters back out of the digest and compares in constant
//! time. A digest that does not parse verifies as `false` rather than
//! surfacing an error to callers deciding control flow.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to hash password")]
    Hash,
}

/// Hash a plaintext password into a self-describing PHC digest.
///
/// # Errors
/// Returns an error if the hasher itself fails; never for any property of
/// the input.
pub fn hash(plaintext: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|_| Error::Hash)
}

/// Check a plaintext password against a stored digest.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    PasswordHash::new(digest).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    })
}
