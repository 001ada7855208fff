/*
 * Responsibility
 * - Gated user lookups
 * - Ownership / admin checks go through services::authz; a denial becomes 403 at the gate
 */
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    api::v1::{dto::users::UserResponse, extractors::AuthCtxExtractor},
    error::AppError,
    services::authz,
    state::AppState,
};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserResponse> {
    Json(UserResponse::from(&ctx.identity))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    // Check before lookup so a denied caller cannot probe which ids exist.
    authz::require_self_or_admin(user_id)?;

    let identity = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(UserResponse::from(&identity)))
}
