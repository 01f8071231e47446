//! End-to-end tests for the token and revocation endpoints: code
//! exchange, replay protection with cascade revocation, refresh scope
//! subsetting, client authentication, and RFC 7009 semantics.

mod common;

use common::*;
use serde_json::Value;
use tower::ServiceExt;

fn exchange_body(code: &str) -> String {
    encode(&[
        ("grant_type", "authorization_code".to_string()),
        ("code", code.to_string()),
        ("redirect_uri", REDIRECT_URI.to_string()),
    ])
}

#[tokio::test]
async fn test_code_exchange_happy_path() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
    assert_eq!(response.headers().get("pragma").unwrap(), "no-cache");
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], "600");
    assert_eq!(body["scope"], SCOPES);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_replay_is_rejected_and_cascades() {
    let provider = provider(true);
    let app = app(provider.clone());
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let access_token = body["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();
    assert!(provider.is_token_active(&access_token));

    // Second presentation of the same code.
    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "invalid_grant");
    assert_eq!(
        body["error_description"],
        "Grant code was revoked, expired or already used."
    );

    // Everything derived from the replayed code is burned.
    assert!(!provider.is_token_active(&access_token));
    assert!(!provider.is_token_active(&refresh_token));
}

#[tokio::test]
async fn test_redirect_uri_mismatch_at_exchange_revokes_grant() {
    let provider = provider(true);
    let app = app(provider.clone());
    let code = obtain_code(&app).await;

    let body = encode(&[
        ("grant_type", "authorization_code".to_string()),
        ("code", code.clone()),
        ("redirect_uri", "https://attacker.com/cb".to_string()),
    ]);
    let response = post_form_basic_auth(&app, TOKEN_PATH, body, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 400);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["error"], "invalid_grant");

    // The grant is revoked, so the honest redirect URI no longer works
    // either.
    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_code_bound_to_issuing_client() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    // A different, correctly authenticated client presents the code.
    let response = post_form_basic_auth(
        &app,
        TOKEN_PATH,
        exchange_body(&code),
        OTHER_CLIENT_ID,
        OTHER_CLIENT_SECRET,
    )
    .await;
    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn test_client_authentication_failure() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, "wrong").await;
    assert_eq!(response.status(), 401);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Basic realm=\"oauth2\""
    );
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "invalid_client");
}

#[tokio::test]
async fn test_client_authentication_in_body() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    let body = encode(&[
        ("grant_type", "authorization_code".to_string()),
        ("code", code),
        ("redirect_uri", REDIRECT_URI.to_string()),
        ("client_id", CLIENT_ID.to_string()),
        ("client_secret", CLIENT_SECRET.to_string()),
    ]);
    let response = post_form(&app, TOKEN_PATH, body).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_missing_credentials_rejected_without_challenge() {
    let app = app(provider(true));

    let response = post_form(&app, TOKEN_PATH, exchange_body("whatever")).await;
    assert_eq!(response.status(), 401);
    assert!(response.headers().get("www-authenticate").is_none());
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();
    let first_access = body["access_token"].as_str().unwrap().to_string();

    // Full-scope refresh.
    let refresh_body = encode(&[
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.clone()),
    ]);
    let response =
        post_form_basic_auth(&app, TOKEN_PATH, refresh_body, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["scope"], SCOPES);
    assert_ne!(body["access_token"].as_str().unwrap(), first_access);
    assert!(body.get("refresh_token").is_none());

    // Narrowed refresh.
    let refresh_body = encode(&[
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token),
        ("scope", "read".to_string()),
    ]);
    let response =
        post_form_basic_auth(&app, TOKEN_PATH, refresh_body, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 200);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["scope"], "read");
}

#[tokio::test]
async fn test_refresh_scope_upgrade_rejected() {
    let app = app(provider(true));
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    // "admin" is in the catalogue but was never granted.
    let refresh_body = encode(&[
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token),
        ("scope", "read admin".to_string()),
    ]);
    let response =
        post_form_basic_auth(&app, TOKEN_PATH, refresh_body, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "invalid_scope");
}

#[tokio::test]
async fn test_reserved_grant_types_are_unsupported() {
    let app = app(provider(true));

    for grant_type in ["password", "client_credentials", "urn:custom:grant"] {
        let body = encode(&[("grant_type", grant_type.to_string())]);
        let response =
            post_form_basic_auth(&app, TOKEN_PATH, body, CLIENT_ID, CLIENT_SECRET).await;
        assert_eq!(response.status(), 400, "grant_type {grant_type}");
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "unsupported_grant_type");
    }
}

#[tokio::test]
async fn test_revocation_endpoint() {
    let provider = provider(true);
    let app = app(provider.clone());
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let access_token = body["access_token"].as_str().unwrap().to_string();
    assert!(provider.is_token_active(&access_token));

    let revoke_body = encode(&[
        ("token", access_token.clone()),
        ("token_type_hint", "access_token".to_string()),
    ]);
    let response =
        post_form_basic_auth(&app, REVOKE_PATH, revoke_body.clone(), CLIENT_ID, CLIENT_SECRET)
            .await;
    assert_eq!(response.status(), 200);
    assert!(!provider.is_token_active(&access_token));

    // Idempotent for already-revoked and unknown tokens alike.
    let response =
        post_form_basic_auth(&app, REVOKE_PATH, revoke_body, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 200);

    let unknown = encode(&[("token", "never-issued".to_string())]);
    let response =
        post_form_basic_auth(&app, REVOKE_PATH, unknown, CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_revocation_requires_token_parameter() {
    let app = app(provider(true));

    let response =
        post_form_basic_auth(&app, REVOKE_PATH, String::new(), CLIENT_ID, CLIENT_SECRET).await;
    assert_eq!(response.status(), 400);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_revocation_requires_client_authentication() {
    let app = app(provider(true));

    let body = encode(&[("token", "whatever".to_string())]);
    let response = post_form(&app, REVOKE_PATH, body).await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_grant_delete_cascades() {
    let provider = provider(true);
    let app = app(provider.clone());
    let code = obtain_code(&app).await;

    let response =
        post_form_basic_auth(&app, TOKEN_PATH, exchange_body(&code), CLIENT_ID, CLIENT_SECRET)
            .await;
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("{AUTHZ_PATH}?code={code}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(!provider.is_token_active(&access_token));

    // Missing code parameter.
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(AUTHZ_PATH)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
