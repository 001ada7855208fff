/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The request gate verifies credentials and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Credential / token verification lives in middleware + services
 */
use uuid::Uuid;

use crate::repos::identity::Identity;

/// Context attached to every request that passed the gate.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: Identity,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }
}
