/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - identity store, token codec, authenticator
 * - Cheap to Clone (everything behind Arc)
 */
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::repos::IdentityStore;
use crate::services::auth::{Authenticator, TokenCodec};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn IdentityStore>,
    pub tokens: Arc<TokenCodec>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(config: &AuthConfig, users: Arc<dyn IdentityStore>) -> Self {
        let tokens = Arc::new(TokenCodec::from_config(config));
        let auth = Arc::new(Authenticator::new(config, tokens.clone(), users.clone()));

        Self {
            users,
            tokens,
            auth,
        }
    }
}
