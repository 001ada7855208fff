mod common;

use auth_gateway::services::auth::TokenKind;
use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use common::{PASSWORD, basic, bearer, json_body, post_json, setup};

#[tokio::test]
async fn login_returns_distinct_verifiable_tokens() {
    let app = setup();

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/auth/token",
            json!({ "email": "alice@example.com", "password": PASSWORD }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 900);

    let access = body["access_token"].as_str().unwrap();
    let refresh = body["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);

    let claims = app.state.tokens.parse_and_verify(access).unwrap();
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.kind, TokenKind::Access);

    let resolved = app
        .state
        .tokens
        .resolve(access, TokenKind::Access, app.repo.as_ref())
        .await
        .unwrap();
    assert_eq!(resolved.id, app.alice.id);
}

#[tokio::test]
async fn failed_logins_are_200_with_status_only() {
    let app = setup();

    for (email, password) in [
        ("alice@example.com", "wrong-password"),
        ("nobody@example.com", PASSWORD),
        ("inactive@example.com", PASSWORD),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/auth/token",
                json!({ "email": email, "password": password }),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{email}");
        assert_eq!(json_body(response).await, json!({ "status": "failure" }));
    }
}

#[tokio::test]
async fn refresh_issues_a_new_pair() {
    let app = setup();
    let refresh_token = app
        .state
        .tokens
        .issue(&app.alice, TokenKind::Refresh)
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/auth/token/refresh",
            json!({}),
            Some(&bearer(&refresh_token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");

    let access = body["access_token"].as_str().unwrap();
    let new_refresh = body["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, refresh_token);

    let claims = app.state.tokens.parse_and_verify(access).unwrap();
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.kind, TokenKind::Access);
    let claims = app.state.tokens.parse_and_verify(new_refresh).unwrap();
    assert_eq!(claims.kind, TokenKind::Refresh);
}

#[tokio::test]
async fn refresh_rejects_access_tokens_basic_and_missing_auth() {
    let app = setup();
    let access_token = app
        .state
        .tokens
        .issue(&app.alice, TokenKind::Access)
        .unwrap();

    for authorization in [
        Some(bearer(&access_token)),
        Some(basic("alice@example.com", PASSWORD)),
        None,
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/auth/token/refresh",
                json!({}),
                authorization.as_deref(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "Authentication error");
    }
}

#[tokio::test]
async fn refresh_rejects_tokens_of_deactivated_users() {
    let app = setup();
    let refresh_token = app
        .state
        .tokens
        .issue(&app.alice, TokenKind::Refresh)
        .unwrap();
    app.repo.set_active(app.alice.id, false);

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/auth/token/refresh",
            json!({}),
            Some(&bearer(&refresh_token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
