/*
 * Responsibility
 * - Load settings from the environment (.env supported) once at startup
 * - Validate them (missing / invalid values abort startup)
 * - Hand the auth part out as an immutable `AuthConfig` value
 */
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::services::auth::scheme::EnabledSchemes;

const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 900; // 15 min
const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: u64 = 2_592_000; // 30 days

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Authentication settings shared by the token codec and the scheme dispatcher.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub schemes: EnabledSchemes,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthConfig")
            .field("schemes", &self.schemes)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_seconds", &self.refresh_token_ttl_seconds)
            .finish()
    }
}

impl AuthConfig {
    pub fn new(secret_key: impl Into<String>, schemes: EnabledSchemes) -> Self {
        Self {
            secret_key: secret_key.into(),
            schemes,
            access_token_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_token_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let secret_key =
            env::var("AUTH_SECRET_KEY").map_err(|_| ConfigError::Missing("AUTH_SECRET_KEY"))?;
        if secret_key.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_SECRET_KEY"));
        }

        let schemes = env::var("AUTH_SCHEMES")
            .unwrap_or_else(|_| "basic,bearer".to_string())
            .parse::<EnabledSchemes>()
            .map_err(|_| ConfigError::Invalid("AUTH_SCHEMES"))?;

        let access_token_ttl_seconds = positive_from_env(
            "ACCESS_TOKEN_TTL_SECONDS",
            DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
        )?;
        let refresh_token_ttl_seconds = positive_from_env(
            "REFRESH_TOKEN_TTL_SECONDS",
            DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        )?;

        Ok(Self {
            secret_key,
            schemes,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
        })
    }
}

/// Optional positive integer setting. Unset falls back to `default`; zero or
/// garbage is rejected.
fn positive_from_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    parse_positive(key, env::var(key).ok(), default)
}

fn parse_positive<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<T>() {
        Ok(v) if v != T::default() => Ok(v),
        _ => Err(ConfigError::Invalid(key)),
    }
}

/// Limits applied by the HTTP-level middleware stack.
#[derive(Debug, Clone, Copy)]
pub struct HttpLimits {
    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub auth: AuthConfig,
    pub http: HttpLimits,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let auth = AuthConfig::from_env()?;

        let defaults = HttpLimits::default();
        let http = HttpLimits {
            request_timeout_seconds: positive_from_env(
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            )?,
            body_limit_bytes: positive_from_env(
                "REQUEST_BODY_LIMIT_BYTES",
                defaults.body_limit_bytes,
            )?,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            auth,
            http,
        })
    }
}
