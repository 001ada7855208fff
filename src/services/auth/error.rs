use thiserror::Error;

use crate::repos::error::RepoError;

/// Why an authentication attempt failed.
///
/// Every variant except `Store` and `Signing` is reported to the client as
/// the same generic 401; the variant itself is only for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("authentication scheme not enabled")]
    UnsupportedScheme,

    #[error("malformed basic credentials")]
    MalformedCredentials,

    #[error("bad credentials")]
    BadCredentials,

    #[error("invalid token")]
    TokenInvalid,

    #[error("expired token")]
    TokenExpired,

    #[error("token kind not accepted here")]
    WrongTokenKind,

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("identity store failure")]
    Store(#[from] RepoError),
}

impl AuthError {
    /// Failures that are the server's fault rather than the caller's.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Signing(_))
    }
}
