use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::identity::{Identity, IdentityStore};

/// Identity store kept in process memory, keyed by user id.
///
/// Used by tests and for local runs without a database. Lookups clone the
/// record out of the lock before returning.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: RwLock<HashMap<Uuid, Identity>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, identity: Identity) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(identity.id, identity);
    }

    pub fn set_active(&self, id: Uuid, is_active: bool) -> bool {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.get_mut(&id) {
            Some(identity) => {
                identity.is_active = is_active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl IdentityStore for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Identity>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Identity>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(&id).cloned())
    }
}
