pub mod context;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod password;
pub mod scheme;

pub use credentials::CredentialVerifier;
pub use error::AuthError;
pub use jwt::{TokenClaims, TokenCodec, TokenKind, TokenPair};
pub use password::Password;
pub use scheme::{AuthScheme, Authenticator, EnabledSchemes};
