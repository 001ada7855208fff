/*
 * Responsibility
 * - Outward view of an identity (never includes the password hash)
 */
use serde::Serialize;
use uuid::Uuid;

use crate::repos::identity::Identity;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            is_active: identity.is_active,
            is_admin: identity.is_admin,
        }
    }
}
