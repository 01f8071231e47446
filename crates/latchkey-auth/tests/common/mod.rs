//! Shared fixtures for the end-to-end flow tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;
use url::Url;

use latchkey_auth::{AuthServer, Client};
use latchkey_memory::InMemoryProvider;

pub const CLIENT_ID: &str = "test_client_id";
pub const CLIENT_SECRET: &str = "test_client_secret";
pub const OTHER_CLIENT_ID: &str = "other_client_id";
pub const OTHER_CLIENT_SECRET: &str = "other_client_secret";
pub const REDIRECT_URI: &str = "https://example.com/cb";
pub const SCOPES: &str = "read write identity";
pub const STATE: &str = "state-test";

pub const AUTHZ_PATH: &str = "/oauth2/authzs";
pub const TOKEN_PATH: &str = "/oauth2/tokens";
pub const REVOKE_PATH: &str = "/oauth2/revoke";

/// Builds the standard two-client, four-scope provider fixture.
pub fn provider(authenticated: bool) -> Arc<InMemoryProvider> {
    let client = Client {
        id: CLIENT_ID.to_string(),
        name: "Test Client".to_string(),
        description: Some("An application under test".to_string()),
        profile_img_url: None,
        homepage_url: Some(Url::parse("https://example.com").unwrap()),
        redirect_uri: Url::parse(REDIRECT_URI).unwrap(),
    };
    let other = Client {
        id: OTHER_CLIENT_ID.to_string(),
        name: "Other Client".to_string(),
        description: None,
        profile_img_url: None,
        homepage_url: None,
        redirect_uri: Url::parse("https://other.example.com/cb").unwrap(),
    };

    Arc::new(
        InMemoryProvider::builder()
            .client(client, CLIENT_SECRET)
            .client(other, OTHER_CLIENT_SECRET)
            .scope("read", "Read your data")
            .scope("write", "Change your data")
            .scope("identity", "Know who you are")
            .scope("admin", "Administer your account")
            .authenticated(authenticated)
            .build(),
    )
}

/// Assembles the router over the given provider with default config.
pub fn app(provider: Arc<InMemoryProvider>) -> Router {
    AuthServer::builder()
        .provider(provider)
        .build()
        .expect("server builds with memory provider")
        .into_router()
}

/// The standard authorization request parameters. Tests mutate the list
/// before encoding it.
pub fn authz_params() -> Vec<(&'static str, String)> {
    vec![
        ("client_id", CLIENT_ID.to_string()),
        ("response_type", "code".to_string()),
        ("state", STATE.to_string()),
        ("redirect_uri", REDIRECT_URI.to_string()),
        ("scope", SCOPES.to_string()),
    ]
}

/// Encodes parameters as `application/x-www-form-urlencoded`.
pub fn encode(params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: String) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_form_basic_auth(
    app: &Router,
    uri: &str,
    body: String,
    client_id: &str,
    client_secret: &str,
) -> Response<Body> {
    use base64::Engine;
    let credentials =
        base64::engine::general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"));
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::AUTHORIZATION, format!("Basic {credentials}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Parses `k=v` pairs from a query or fragment string.
pub fn parse_pairs(input: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(input.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn pair<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Runs the full consent flow and returns the freshly minted grant code.
pub async fn obtain_code(app: &Router) -> String {
    let response = post_form(app, AUTHZ_PATH, encode(&authz_params())).await;
    assert_eq!(response.status(), 302, "consent POST should redirect");

    let url = Url::parse(&location(&response)).unwrap();
    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .expect("code in redirect");
    assert!(!code.is_empty());
    code
}
