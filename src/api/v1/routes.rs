/*
 * Responsibility
 * - URL layout of v1 and the token endpoints
 * - Which routes sit behind the gate, and with which token kind
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    token::{login, refresh},
    users::{get_user, me},
};
use crate::middleware::auth::{GateOptions, gate};
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
pub fn routes(state: AppState) -> Router<AppState> {
    let gated = Router::new()
        .route("/users/me", get(me))
        .route("/users/{user_id}", get(get_user));
    let gated = gate::apply(gated, state, GateOptions::access());

    Router::new().route("/health", get(health)).merge(gated)
}

/// Routes mounted under `/auth`.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let refresh_route = Router::new().route("/token/refresh", post(refresh));
    let refresh_route = gate::apply(refresh_route, state, GateOptions::refresh());

    Router::new().route("/token", post(login)).merge(refresh_route)
}
