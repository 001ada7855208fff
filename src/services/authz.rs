/*
 * Responsibility
 * - Authorization checks performed after authentication succeeded
 * - `AuthorizationDenied`: the distinct error kind the request gate turns into 403
 *
 * Notes
 * - Checks read the caller from the execution context bound by the gate.
 * - Without a bound identity every check denies.
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::repos::identity::Identity;
use crate::services::auth::context::current_identity;

#[derive(Debug, Clone, Error)]
#[error("authorization denied: {reason}")]
pub struct AuthorizationDenied {
    pub reason: &'static str,
}

impl AuthorizationDenied {
    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A bare 403 tagged with the denial; the gate replaces the body.
impl IntoResponse for AuthorizationDenied {
    fn into_response(self) -> Response {
        let mut response = StatusCode::FORBIDDEN.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

fn caller() -> Result<Identity, AuthorizationDenied> {
    current_identity().ok_or(AuthorizationDenied::new("no identity bound"))
}

/// The current caller, if it is an admin.
pub fn require_admin() -> Result<Identity, AuthorizationDenied> {
    let identity = caller()?;
    if identity.is_admin {
        Ok(identity)
    } else {
        Err(AuthorizationDenied::new("admin required"))
    }
}

/// The current caller, if it is `target` itself or an admin.
pub fn require_self_or_admin(target: Uuid) -> Result<Identity, AuthorizationDenied> {
    let identity = caller()?;
    if identity.is_admin || identity.id == target {
        Ok(identity)
    } else {
        Err(AuthorizationDenied::new("not owner"))
    }
}
