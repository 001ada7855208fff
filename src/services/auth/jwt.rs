use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::repos::identity::{Identity, IdentityStore};
use crate::services::auth::error::AuthError;

/// Which job a token is allowed to do. Serialized as the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Token claims. `email`, `exp` and `type` are required on the wire;
/// `iat` and `jti` are always written but tolerated when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// HS256 codec for access and refresh tokens.
///
/// Tokens are stateless: a token stays valid until `exp` or until the
/// signing secret changes.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], access_ttl_seconds: u64, refresh_ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand against the caller's clock (see `parse_and_verify_at`).
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.secret_key.as_bytes(),
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        )
    }

    pub fn access_token_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }

    pub fn refresh_token_ttl_seconds(&self) -> u64 {
        self.refresh_ttl_seconds
    }

    fn ttl_seconds(&self, kind: TokenKind) -> u64 {
        match kind {
            TokenKind::Access => self.access_ttl_seconds,
            TokenKind::Refresh => self.refresh_ttl_seconds,
        }
    }

    pub fn issue(&self, identity: &Identity, kind: TokenKind) -> Result<String, AuthError> {
        self.issue_at(identity, kind, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: &Identity,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let ttl = i64::try_from(self.ttl_seconds(kind)).unwrap_or(i64::MAX);
        let exp = Duration::try_seconds(ttl)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let claims = TokenClaims {
            email: identity.email.clone(),
            exp: exp.timestamp(),
            kind,
            iat: Some(now.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, kind = %kind, "failed to sign token");
                AuthError::Signing(e)
            },
        )
    }

    /// Issue one access and one refresh token for the identity.
    pub fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(identity, TokenKind::Access)?,
            refresh_token: self.issue(identity, TokenKind::Refresh)?,
        })
    }

    pub fn parse_and_verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.parse_and_verify_at(token, Utc::now())
    }

    /// Verify signature and required claims, then expiry against `now`.
    ///
    /// A token is still accepted at exactly its `exp` second.
    pub fn parse_and_verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, AuthError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::TokenInvalid
            })?;
        let claims = data.claims;

        if claims.email.trim().is_empty() {
            return Err(AuthError::TokenInvalid);
        }
        if now.timestamp() > claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verify a bearer token of the expected kind and resolve its subject.
    ///
    /// A well-formed token whose user no longer exists or is inactive is
    /// rejected as `TokenInvalid`.
    pub async fn resolve(
        &self,
        token: &str,
        expected: TokenKind,
        store: &dyn IdentityStore,
    ) -> Result<Identity, AuthError> {
        let claims = self.parse_and_verify(token)?;

        if claims.kind != expected {
            return Err(AuthError::WrongTokenKind);
        }

        match store.find_by_email(&claims.email).await? {
            Some(identity) if identity.is_active => Ok(identity),
            _ => Err(AuthError::TokenInvalid),
        }
    }
}
