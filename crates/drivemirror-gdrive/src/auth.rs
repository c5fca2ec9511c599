//! OAuth2 token acquisition for the Drive API
//!
//! The adapter authenticates with a long-lived refresh token obtained out of
//! band through a one-time consent flow. [`RefreshTokenProvider`] exchanges
//! it for short-lived access tokens via the `oauth2` crate and caches the
//! result until shortly before expiry, so a busy pass does not hit the token
//! endpoint per request. [`StaticTokenProvider`] serves a fixed token for
//! tests and pre-issued credentials.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::BasicClient, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RefreshToken,
    TokenResponse, TokenUrl,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use drivemirror_core::config::OAuthConfig;

/// Google's OAuth2 token endpoint
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refresh this long before the cached token would expire
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Supplies bearer tokens for Drive API requests
#[async_trait::async_trait]
pub trait ITokenProvider: Send + Sync {
    /// Returns a currently valid access token
    async fn access_token(&self) -> Result<String>;
}

// ============================================================================
// StaticTokenProvider
// ============================================================================

/// Serves one fixed token; no refresh, no expiry tracking
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait::async_trait]
impl ITokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

// ============================================================================
// RefreshTokenProvider
// ============================================================================

/// OAuth2 client with only the token endpoint configured
type RefreshClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

struct CachedToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges a refresh token for access tokens, with in-process caching
pub struct RefreshTokenProvider {
    client: RefreshClient,
    refresh_token: RefreshToken,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl RefreshTokenProvider {
    /// Creates a provider against Google's token endpoint
    pub fn new(config: &OAuthConfig) -> Result<Self> {
        Self::with_token_url(config, TOKEN_URL)
    }

    /// Creates a provider with a custom token endpoint (useful for testing)
    pub fn with_token_url(config: &OAuthConfig, token_url: &str) -> Result<Self> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_token_uri(TokenUrl::new(token_url.to_string()).context("Invalid token URL")?);

        Ok(Self {
            client,
            refresh_token: RefreshToken::new(config.refresh_token.clone()),
            http: reqwest::Client::new(),
            cached: Mutex::new(None),
        })
    }

    async fn refresh(&self) -> Result<CachedToken> {
        info!("Refreshing Drive access token");

        let token_result = self
            .client
            .exchange_refresh_token(&self.refresh_token)
            .request_async(&self.http)
            .await
            .context("Refresh token exchange failed")?;

        let expires_at = token_result
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64))
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        Ok(CachedToken {
            secret: token_result.access_token().secret().to_string(),
            expires_at,
        })
    }
}

#[async_trait::async_trait]
impl ITokenProvider for RefreshTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS) < token.expires_at {
                debug!("Using cached access token");
                return Ok(token.secret.clone());
            }
        }

        let fresh = self.refresh().await?;
        let secret = fresh.secret.clone();
        *cached = Some(fresh);
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_provider_returns_its_token() {
        let provider = StaticTokenProvider::new("fixed-token");
        assert_eq!(provider.access_token().await.unwrap(), "fixed-token");
    }

    #[test]
    fn provider_construction_accepts_any_well_formed_url() {
        let config = OAuthConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        };
        assert!(RefreshTokenProvider::with_token_url(&config, "http://127.0.0.1:1/token").is_ok());
        assert!(RefreshTokenProvider::with_token_url(&config, "not a url").is_err());
    }
}
