//! Request gate: authenticate → bind identity → run handler → map denials.
//!
//! Per request the gate either rejects (401, handler never runs) or binds the
//! resolved identity (request extensions + task-local execution context) and
//! runs the handler. A handler response tagged with `AuthorizationDenied`
//! becomes the generic 403. Everything else passes through untouched.

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, TokenKind, context};
use crate::services::authz::AuthorizationDenied;
use crate::state::AppState;

/// Per-route gate settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOptions {
    /// Kind a Bearer token must carry to pass this gate.
    pub required_kind: TokenKind,
}

impl GateOptions {
    pub fn access() -> Self {
        Self {
            required_kind: TokenKind::Access,
        }
    }

    /// Only for the token refresh route.
    pub fn refresh() -> Self {
        Self {
            required_kind: TokenKind::Refresh,
        }
    }
}

impl Default for GateOptions {
    fn default() -> Self {
        Self::access()
    }
}

#[derive(Clone)]
struct GateState {
    app: AppState,
    options: GateOptions,
}

/// Put every route currently registered on `router` behind the gate.
///
/// ```ignore
/// let users = Router::new().route("/users/me", get(me));
/// let users = middleware::auth::gate::apply(users, state.clone(), GateOptions::access());
/// ```
pub fn apply(router: Router<AppState>, state: AppState, options: GateOptions) -> Router<AppState> {
    let gate = GateState {
        app: state,
        options,
    };
    router.route_layer(middleware::from_fn_with_state(gate, gate_middleware))
}

async fn gate_middleware(State(gate): State<GateState>, mut req: Request, next: Next) -> Response {
    let required = gate.options.required_kind;

    // Copy the header out: the request must not be borrowed across the await.
    let authorization = match req
        .headers()
        .get(header::AUTHORIZATION)
        .map(HeaderValue::to_str)
    {
        None => None,
        Some(Ok(value)) => Some(value.to_owned()),
        Some(Err(_)) => return reject(AuthError::MalformedHeader, required),
    };

    let identity = match gate
        .app
        .auth
        .authenticate(authorization.as_deref(), required)
        .await
    {
        Ok(identity) => identity,
        Err(err) => return reject(err, required),
    };

    let user_id = identity.id;
    req.extensions_mut().insert(AuthCtx::new(identity.clone()));

    let response = context::scope(identity, next.run(req)).await;

    if let Some(denied) = response.extensions().get::<AuthorizationDenied>() {
        tracing::warn!(user_id = %user_id, reason = denied.reason, "authorization denied");
        return AppError::Forbidden.into_response();
    }

    response
}

fn reject(err: AuthError, required: TokenKind) -> Response {
    if err.is_internal() {
        tracing::error!(error = ?err, kind = %required, "authentication could not complete");
    } else {
        tracing::warn!(reason = %err, kind = %required, "authentication failed");
    }
    AppError::from(err).into_response()
}
