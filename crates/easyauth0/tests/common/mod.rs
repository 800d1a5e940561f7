//! Shared fixtures: a wiremock tenant and HS256 token minting.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use base64::{Engine, engine::general_purpose::STANDARD};
use easyauth0::{Auth0Config, BasicAuthHelper};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DOMAIN: &str = "tenant.example.com";
pub const ISSUER: &str = "https://tenant.example.com/";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const CONNECTION: &str = "Username-Password-Authentication";

static NONCE: AtomicU64 = AtomicU64::new(0);

pub fn config_for(server: &MockServer) -> Auth0Config {
    Auth0Config::new(DOMAIN, CLIENT_ID, CLIENT_SECRET, CONNECTION)
        .with_api_base_url(server.uri().parse().expect("mock server uri"))
}

pub fn helper_for(server: &MockServer) -> BasicAuthHelper {
    BasicAuthHelper::new(config_for(server)).expect("helper")
}

/// Mints a fresh ID token for `email`; every call yields a distinct token.
pub fn mint_id_token(email: &str) -> String {
    mint_token(email, CLIENT_SECRET, ISSUER)
}

pub fn mint_token(email: &str, secret: &str, issuer: &str) -> String {
    let claims = json!({
        "iss": issuer,
        "sub": format!("auth0|{email}"),
        "aud": CLIENT_ID,
        "email": email,
        "exp": get_current_timestamp() + 3600,
        "nonce": NONCE.fetch_add(1, Ordering::SeqCst),
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

pub fn basic_header(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Accepts `username`/`password` on the password-realm grant, returning
/// `id_token` and `refresh_token` with an opaque access token `opaque_token`.
pub async fn mount_login(
    server: &MockServer,
    username: &str,
    password: &str,
    opaque_token: &str,
    id_token: &str,
    refresh_token: &str,
) {
    login_mock(username, password, opaque_token, id_token, refresh_token)
        .mount(server)
        .await;
}

pub fn login_mock(
    username: &str,
    password: &str,
    opaque_token: &str,
    id_token: &str,
    refresh_token: &str,
) -> Mock {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "http://auth0.com/oauth/grant-type/password-realm",
            "username": username,
            "password": password,
            "realm": CONNECTION,
            "client_id": CLIENT_ID,
            "scope": "openid offline_access",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": opaque_token,
            "id_token": id_token,
            "refresh_token": refresh_token,
            "expires_in": 86400,
            "token_type": "Bearer",
            "scope": "openid offline_access",
        })))
}

pub async fn mount_userinfo(server: &MockServer, opaque_token: &str, email: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .and(header("authorization", bearer_header(opaque_token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": format!("auth0|{email}"),
            "email": email,
            "nickname": name.to_lowercase(),
            "name": name,
        })))
        .mount(server)
        .await;
}

/// Answers a refresh of `refresh_token` with a new `id_token`.
pub async fn mount_refresh(server: &MockServer, refresh_token: &str, id_token: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(format!("refresh_token={refresh_token}")))
        .and(body_string_contains(format!("client_id={CLIENT_ID}")))
        .and(body_string_contains("scope=openid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "opaque-refreshed",
            "id_token": id_token,
            "expires_in": 7200,
            "token_type": "Bearer",
            "scope": "openid",
        })))
        .mount(server)
        .await;
}
