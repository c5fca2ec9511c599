//! Integration tests for the refresh-token provider

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drivemirror_core::config::OAuthConfig;
use drivemirror_gdrive::auth::{ITokenProvider, RefreshTokenProvider};

fn oauth_config() -> OAuthConfig {
    OAuthConfig {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        refresh_token: "test-refresh-token".to_string(),
    }
}

#[tokio::test]
async fn refresh_exchange_yields_an_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=test-refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    let provider =
        RefreshTokenProvider::with_token_url(&oauth_config(), &format!("{}/token", server.uri()))
            .expect("build provider");

    let token = provider.access_token().await.expect("token exchange");
    assert_eq!(token, "fresh-access-token");
}

#[tokio::test]
async fn unexpired_tokens_are_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "cached-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        RefreshTokenProvider::with_token_url(&oauth_config(), &format!("{}/token", server.uri()))
            .expect("build provider");

    let first = provider.access_token().await.expect("first exchange");
    let second = provider.access_token().await.expect("second call");
    assert_eq!(first, second);
    // The .expect(1) on the mock verifies only one exchange happened.
}

#[tokio::test]
async fn expired_tokens_trigger_a_new_exchange() {
    let server = MockServer::start().await;
    // expires_in of 0 makes the cached token immediately stale.
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "short-lived-token",
            "token_type": "Bearer",
            "expires_in": 0
        })))
        .expect(2)
        .mount(&server)
        .await;

    let provider =
        RefreshTokenProvider::with_token_url(&oauth_config(), &format!("{}/token", server.uri()))
            .expect("build provider");

    provider.access_token().await.expect("first exchange");
    provider.access_token().await.expect("second exchange");
}

#[tokio::test]
async fn exchange_failure_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let provider =
        RefreshTokenProvider::with_token_url(&oauth_config(), &format!("{}/token", server.uri()))
            .expect("build provider");

    let result = provider.access_token().await;
    assert!(result.is_err());
}
