use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::AuthConfig;
use crate::repos::identity::{Identity, IdentityStore};
use crate::services::auth::credentials::CredentialVerifier;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwt::{TokenCodec, TokenKind};
use crate::services::auth::password::Password;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Basic,
    Bearer,
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Basic => f.write_str("Basic"),
            AuthScheme::Bearer => f.write_str("Bearer"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("basic") {
            Ok(Self::Basic)
        } else if s.eq_ignore_ascii_case("bearer") {
            Ok(Self::Bearer)
        } else {
            Err(AuthError::UnsupportedScheme)
        }
    }
}

/// Schemes a deployment accepts. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledSchemes {
    basic: bool,
    bearer: bool,
}

impl EnabledSchemes {
    pub fn all() -> Self {
        Self {
            basic: true,
            bearer: true,
        }
    }

    pub fn only(scheme: AuthScheme) -> Self {
        Self {
            basic: scheme == AuthScheme::Basic,
            bearer: scheme == AuthScheme::Bearer,
        }
    }

    pub fn contains(&self, scheme: AuthScheme) -> bool {
        match scheme {
            AuthScheme::Basic => self.basic,
            AuthScheme::Bearer => self.bearer,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid scheme list: {0:?}")]
pub struct ParseSchemesError(String);

impl FromStr for EnabledSchemes {
    type Err = ParseSchemesError;

    /// Parses a comma separated list such as `"basic,bearer"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut enabled = Self {
            basic: false,
            bearer: false,
        };

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<AuthScheme>() {
                Ok(AuthScheme::Basic) => enabled.basic = true,
                Ok(AuthScheme::Bearer) => enabled.bearer = true,
                Err(_) => return Err(ParseSchemesError(s.to_string())),
            }
        }

        if !enabled.basic && !enabled.bearer {
            return Err(ParseSchemesError(s.to_string()));
        }
        Ok(enabled)
    }
}

/// Split an `Authorization` header value into scheme and credentials on the
/// first run of whitespace.
pub fn parse_authorization(header: &str) -> Result<(AuthScheme, &str), AuthError> {
    let (scheme, credentials) = header
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(AuthError::MalformedHeader)?;

    let credentials = credentials.trim();
    if credentials.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok((scheme.parse()?, credentials))
}

/// Decode Basic credentials (`base64(email:password)`).
///
/// The password may itself contain `:`; only the first one separates.
pub fn decode_basic(credentials: &str) -> Result<(String, Password), AuthError> {
    let raw = STANDARD
        .decode(credentials)
        .map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(raw).map_err(|_| AuthError::MalformedCredentials)?;
    let (email, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;

    Ok((email.to_string(), Password::new(password)))
}

/// Picks the verification strategy from the `Authorization` header and
/// resolves the caller's identity.
#[derive(Clone)]
pub struct Authenticator {
    schemes: EnabledSchemes,
    credentials: CredentialVerifier,
    tokens: Arc<TokenCodec>,
    store: Arc<dyn IdentityStore>,
}

impl Authenticator {
    pub fn new(
        config: &AuthConfig,
        tokens: Arc<TokenCodec>,
        store: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            schemes: config.schemes,
            credentials: CredentialVerifier::new(store.clone()),
            tokens,
            store,
        }
    }

    pub fn credentials(&self) -> &CredentialVerifier {
        &self.credentials
    }

    /// Authenticate a request.
    ///
    /// `required` is the token kind a Bearer credential must carry. Basic
    /// credentials are only accepted where access tokens are, so the refresh
    /// route can only be reached with a refresh token.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        required: TokenKind,
    ) -> Result<Identity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingHeader)?;
        let (scheme, credentials) = parse_authorization(header)?;

        if !self.schemes.contains(scheme) {
            return Err(AuthError::UnsupportedScheme);
        }

        match scheme {
            AuthScheme::Basic => {
                if required != TokenKind::Access {
                    return Err(AuthError::UnsupportedScheme);
                }
                let (email, password) = decode_basic(credentials)?;
                self.credentials
                    .verify(&email, &password)
                    .await?
                    .ok_or(AuthError::BadCredentials)
            }
            AuthScheme::Bearer => {
                self.tokens
                    .resolve(credentials, required, self.store.as_ref())
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::InMemoryUserRepo;
    use crate::services::auth::password::hash_password;
    use uuid::Uuid;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    fn setup(schemes: EnabledSchemes) -> (Authenticator, Arc<TokenCodec>, Identity) {
        let config = AuthConfig::new("scheme-test-secret", schemes);
        let repo = Arc::new(InMemoryUserRepo::new());
        let user = Identity {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            is_active: true,
            is_admin: false,
            password_hash: hash_password(&Password::new("pw:with:colons")).unwrap(),
        };
        repo.insert(user.clone());
        let tokens = Arc::new(TokenCodec::from_config(&config));
        let auth = Authenticator::new(&config, tokens.clone(), repo);
        (auth, tokens, user)
    }

    #[test]
    fn parses_scheme_and_credentials() {
        let (scheme, credentials) = parse_authorization("Bearer abc.def.ghi").unwrap();
        assert_eq!(scheme, AuthScheme::Bearer);
        assert_eq!(credentials, "abc.def.ghi");

        let (scheme, _) = parse_authorization("basic   Zm9vOmJhcg==").unwrap();
        assert_eq!(scheme, AuthScheme::Basic);
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(matches!(
            parse_authorization("Bearer"),
            Err(AuthError::MalformedHeader)
        ));
        assert!(matches!(
            parse_authorization("   "),
            Err(AuthError::MalformedHeader)
        ));
        assert!(matches!(
            parse_authorization("Digest abc"),
            Err(AuthError::UnsupportedScheme)
        ));
    }

    #[test]
    fn basic_decoding_failures_fold_together() {
        assert!(matches!(
            decode_basic("%%%not-base64"),
            Err(AuthError::MalformedCredentials)
        ));
        assert!(matches!(
            decode_basic(&STANDARD.encode("no-colon-here")),
            Err(AuthError::MalformedCredentials)
        ));
        assert!(matches!(
            decode_basic(&STANDARD.encode([0xff, 0xfe, b':', b'x'])),
            Err(AuthError::MalformedCredentials)
        ));
    }

    #[test]
    fn basic_splits_on_first_colon() {
        let (email, password) = decode_basic(&STANDARD.encode("a@b.c:x:y")).unwrap();
        assert_eq!(email, "a@b.c");
        assert_eq!(password.as_str(), "x:y");
    }

    #[test]
    fn scheme_list_parsing() {
        assert_eq!(
            "basic, Bearer".parse::<EnabledSchemes>().unwrap(),
            EnabledSchemes::all()
        );
        assert_eq!(
            "bearer".parse::<EnabledSchemes>().unwrap(),
            EnabledSchemes::only(AuthScheme::Bearer)
        );
        assert!("".parse::<EnabledSchemes>().is_err());
        assert!("basic,digest".parse::<EnabledSchemes>().is_err());
    }

    #[tokio::test]
    async fn basic_and_bearer_both_resolve() {
        let (auth, tokens, user) = setup(EnabledSchemes::all());

        let via_basic = auth
            .authenticate(
                Some(basic("alice@example.com:pw:with:colons").as_str()),
                TokenKind::Access,
            )
            .await
            .unwrap();
        assert_eq!(via_basic.id, user.id);

        let token = tokens.issue(&user, TokenKind::Access).unwrap();
        let via_bearer = auth
            .authenticate(Some(format!("Bearer {token}").as_str()), TokenKind::Access)
            .await
            .unwrap();
        assert_eq!(via_bearer.id, user.id);
    }

    #[tokio::test]
    async fn disabled_scheme_is_rejected() {
        let (auth, _, _) = setup(EnabledSchemes::only(AuthScheme::Bearer));

        let result = auth
            .authenticate(
                Some(basic("alice@example.com:pw:with:colons").as_str()),
                TokenKind::Access,
            )
            .await;
        assert!(matches!(result, Err(AuthError::UnsupportedScheme)));
    }

    #[tokio::test]
    async fn missing_header_and_bad_password() {
        let (auth, _, _) = setup(EnabledSchemes::all());

        assert!(matches!(
            auth.authenticate(None, TokenKind::Access).await,
            Err(AuthError::MissingHeader)
        ));
        assert!(matches!(
            auth.authenticate(Some(basic("alice@example.com:wrong").as_str()), TokenKind::Access)
                .await,
            Err(AuthError::BadCredentials)
        ));
        assert!(matches!(
            auth.authenticate(Some(basic("nouser@x.com:pw").as_str()), TokenKind::Access)
                .await,
            Err(AuthError::BadCredentials)
        ));
    }

    #[tokio::test]
    async fn token_kinds_do_not_cross() {
        let (auth, tokens, user) = setup(EnabledSchemes::all());
        let access = tokens.issue(&user, TokenKind::Access).unwrap();
        let refresh = tokens.issue(&user, TokenKind::Refresh).unwrap();

        assert!(matches!(
            auth.authenticate(Some(format!("Bearer {refresh}").as_str()), TokenKind::Access)
                .await,
            Err(AuthError::WrongTokenKind)
        ));
        assert!(matches!(
            auth.authenticate(Some(format!("Bearer {access}").as_str()), TokenKind::Refresh)
                .await,
            Err(AuthError::WrongTokenKind)
        ));
        assert!(
            auth.authenticate(Some(format!("Bearer {refresh}").as_str()), TokenKind::Refresh)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn refresh_kind_does_not_accept_basic() {
        let (auth, _, _) = setup(EnabledSchemes::all());

        let result = auth
            .authenticate(
                Some(basic("alice@example.com:pw:with:colons").as_str()),
                TokenKind::Refresh,
            )
            .await;
        assert!(matches!(result, Err(AuthError::UnsupportedScheme)));
    }
}
