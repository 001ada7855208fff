use serde::Serialize;

use crate::services::auth::TokenPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Success,
    Failure,
}

/// Response body of both token endpoints.
///
/// A failed login carries only `status`; the token fields are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub status: TokenStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Always "Bearer" when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<&'static str>,

    /// Seconds until the access token expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    pub fn success(pair: TokenPair, expires_in: u64) -> Self {
        Self {
            status: TokenStatus::Success,
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            token_type: Some("Bearer"),
            expires_in: Some(expires_in),
        }
    }

    pub fn failure() -> Self {
        Self {
            status: TokenStatus::Failure,
            access_token: None,
            refresh_token: None,
            token_type: None,
            expires_in: None,
        }
    }
}
