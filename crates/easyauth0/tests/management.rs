//! User listing through the management API.

mod common;

use common::*;
use easyauth0::{AuthError, AuthHelper};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUDIENCE: &str = "https://tenant.example.com/api/v2/";

async fn mount_admin_token(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains(format!("client_id={CLIENT_ID}")))
        .and(body_string_contains("audience="))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn mails_lists_connection_users() {
    let server = MockServer::start().await;
    mount_admin_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "admin-token",
            "expires_in": 86400,
            "token_type": "Bearer"
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .and(query_param("connection", CONNECTION))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "email": "alice@example.com", "nickname": "alice", "username": "alice01", "name": "Alice" },
            { "email": "bob@example.com", "nickname": "bob", "name": "Bob" }
        ])))
        .mount(&server)
        .await;

    let helper = helper_for(&server);
    let users = helper.mails(AUDIENCE).await.expect("listing succeeds");

    let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["alice@example.com", "bob@example.com"]);
    assert_eq!(users[0].display_name, "alice01");
    assert_eq!(users[1].display_name, "Bob");
}

#[tokio::test]
async fn admin_token_without_access_token_is_an_error() {
    let server = MockServer::start().await;
    mount_admin_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })),
    )
    .await;

    let helper = helper_for(&server);
    let err = helper.mails(AUDIENCE).await.unwrap_err();

    assert!(matches!(err, AuthError::AdminToken { .. }));
}

#[tokio::test]
async fn rejected_admin_grant_is_an_error() {
    let server = MockServer::start().await;
    mount_admin_token(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({ "error": "access_denied" })),
    )
    .await;

    let helper = helper_for(&server);
    let err = helper.mails(AUDIENCE).await.unwrap_err();

    match err {
        AuthError::AdminToken { message } => assert!(message.contains("access_denied")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_listing_is_an_error() {
    let server = MockServer::start().await;
    mount_admin_token(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": "admin-token" })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "statusCode": 403,
            "error": "Forbidden",
            "message": "Insufficient scope, expected any of: read:users"
        })))
        .mount(&server)
        .await;

    let helper = helper_for(&server);
    let err = helper.mails(AUDIENCE).await.unwrap_err();

    assert!(matches!(err, AuthError::UserListing { .. }));
    assert!(err.is_provider_error());
}
