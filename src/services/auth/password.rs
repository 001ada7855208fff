use std::fmt;
use std::sync::LazyLock;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Plain-text password. `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("stored password hash is not a valid PHC string")]
    InvalidHash,

    #[error("password does not match")]
    Mismatch,
}

/// Hash a password with argon2id and a random salt.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Verify a password against a stored PHC hash.
///
/// The digest comparison inside argon2 is constant-time.
pub fn verify_password(password: &Password, password_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .map_err(|_| PasswordError::Mismatch)
}

// Stand-in hash for accounts that do not exist; same parameters as real ones.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(&Password::new("no-such-account")).ok());

#[cfg(test)]
pub(crate) static DUMMY_VERIFICATIONS: AtomicUsize = AtomicUsize::new(0);

/// Run one argon2 verification against a fixed hash and discard the result.
///
/// Lets a lookup miss cost as much as a wrong password.
pub fn verify_dummy(password: &Password) {
    #[cfg(test)]
    DUMMY_VERIFICATIONS.fetch_add(1, Ordering::SeqCst);

    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
