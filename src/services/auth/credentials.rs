use std::sync::Arc;

use tracing::debug;

use crate::repos::identity::{Identity, IdentityStore};
use crate::services::auth::error::AuthError;
use crate::services::auth::password::{Password, verify_dummy, verify_password};

/// Checks an (email, password) pair against the identity store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn IdentityStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Returns the identity only if it exists, the password matches and the
    /// account is active.
    ///
    /// Unknown email, wrong password and inactive account all come back as
    /// `Ok(None)`, each after exactly one argon2 verification. Only store
    /// failures are errors.
    pub async fn verify(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<Option<Identity>, AuthError> {
        let Some(identity) = self.store.find_by_email(email).await? else {
            verify_dummy(password);
            debug!(reason = "unknown_email", "credential check failed");
            return Ok(None);
        };

        if let Err(e) = verify_password(password, &identity.password_hash) {
            debug!(user_id = %identity.id, reason = %e, "credential check failed");
            return Ok(None);
        }

        if !identity.is_active {
            debug!(user_id = %identity.id, reason = "inactive", "credential check failed");
            return Ok(None);
        }

        Ok(Some(identity))
    }
}
