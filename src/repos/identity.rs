/*
 * Responsibility
 * - The authenticated principal as read from the user store
 * - The lookup contract the gateway needs from that store
 *
 * Notes
 * - Users are owned by the core domain library; this crate only reads them.
 */
use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    /// argon2 PHC string. Never serialized outward.
    pub password_hash: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("is_active", &self.is_active)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

/// Read-only lookups against the user store.
///
/// Both lookups return inactive users as well; callers decide what an
/// inactive user means for them. Email matching is exact (case-sensitive).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Identity>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Identity>>;
}
