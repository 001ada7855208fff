/*
 * Responsibility
 * - POST /auth/token: credentials -> access/refresh pair
 * - POST /auth/token/refresh: refresh token (checked by the gate) -> new pair
 *
 * Notes
 * - A failed login is still 200; only the body says "failure". This keeps
 *   account existence out of the status code.
 */
use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::api::v1::dto::{token_request::LoginRequest, token_response::TokenResponse};
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::services::auth::Password;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let password = Password::new(req.password);

    let Some(identity) = state
        .auth
        .credentials()
        .verify(&req.email, &password)
        .await?
    else {
        info!("login rejected");
        return Ok(Json(TokenResponse::failure()));
    };

    let pair = state.tokens.issue_pair(&identity)?;
    info!(user_id = %identity.id, "login succeeded");

    Ok(Json(TokenResponse::success(
        pair,
        state.tokens.access_token_ttl_seconds(),
    )))
}

pub async fn refresh(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<TokenResponse>, AppError> {
    let pair = state.tokens.issue_pair(&ctx.identity)?;
    info!(user_id = %ctx.user_id(), "token pair refreshed");

    Ok(Json(TokenResponse::success(
        pair,
        state.tokens.access_token_ttl_seconds(),
    )))
}
