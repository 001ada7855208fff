//! Request-scoped execution context.
//!
//! The request gate binds the authenticated identity for the duration of the
//! wrapped handler. Code further down the call chain reads it with
//! [`current_identity`] instead of having it threaded through every call.
//!
//! The binding is a tokio task-local: it is visible only inside the future
//! passed to [`scope`] and ends when that future completes, errors, panics
//! or is dropped. Concurrent requests never observe each other's binding.

use std::future::Future;

use crate::repos::identity::Identity;

tokio::task_local! {
    static CURRENT_IDENTITY: Identity;
}

/// Run `fut` with `identity` bound as the current identity.
pub async fn scope<F>(identity: Identity, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_IDENTITY.scope(identity, fut).await
}

/// The identity bound by the enclosing [`scope`], if any.
pub fn current_identity() -> Option<Identity> {
    CURRENT_IDENTITY.try_with(Identity::clone).ok()
}
