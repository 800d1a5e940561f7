//! HTTP client for an Auth0 tenant.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ProviderError;
use super::domain::{issuer_for, normalize_domain};
use super::verifier::{IdTokenClaims, TokenVerifier, VerifyError};
use crate::AuthResult;
use crate::config::Auth0Config;
use crate::error::AuthError;
use crate::types::{ManagedUser, RefreshResult, TokenSet, User, UserInfo};

const GRANT_PASSWORD_REALM: &str = "http://auth0.com/oauth/grant-type/password-realm";
const GRANT_REFRESH: &str = "refresh_token";
const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

const PATH_TOKEN: &str = "/oauth/token";
const PATH_USERINFO: &str = "/userinfo";
const PATH_CHANGE_PASSWORD: &str = "/dbconnections/change_password";
const PATH_USERS: &str = "/api/v2/users";

/// Scope requested on refresh.
pub const SCOPE_OPENID: &str = "openid";

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

/// Client for one tenant and application.
///
/// Wraps a shared `reqwest::Client` and the tenant's [`TokenVerifier`].
pub struct Auth0Client {
    http: reqwest::Client,
    base_url: String,
    issuer: String,
    client_id: String,
    client_secret: String,
    connection: String,
    verifier: TokenVerifier,
}

impl Auth0Client {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Configuration` if the config is incomplete or the
    /// HTTP client cannot be built, and `AuthError::InvalidDomain` if the
    /// tenant domain does not normalize to a valid URL.
    pub fn new(config: &Auth0Config) -> AuthResult<Self> {
        config.validate()?;

        let tenant_url = normalize_domain(&config.domain)?;
        let issuer = issuer_for(&tenant_url);
        let base_url = config
            .api_base_url
            .as_ref()
            .map_or(tenant_url, |url| url.as_str().trim_end_matches('/').to_string());

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AuthError::configuration(format!("failed to build HTTP client: {e}")))?;

        let verifier = TokenVerifier::new(&config.client_secret, issuer.clone(), config.leeway);

        tracing::debug!(issuer = %issuer, base_url = %base_url, "Auth0 client configured");

        Ok(Self {
            http,
            base_url,
            issuer,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            connection: config.connection.clone(),
            verifier,
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Expected `iss` claim of tenant tokens (`https://<tenant>/`).
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Base URL outbound requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Database connection users log in against.
    #[must_use]
    pub fn connection(&self) -> &str {
        &self.connection
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Verifies an ID token against the client secret and tenant issuer.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] if the signature, issuer or expiry check fails.
    pub fn verify(&self, token: &str) -> Result<IdTokenClaims, VerifyError> {
        self.verifier.verify(token)
    }

    /// Resource-owner password login against the configured connection.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, a rejected grant, or
    /// an unparseable token response.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        scope: &str,
    ) -> Result<TokenSet, ProviderError> {
        const OPERATION: &str = "login";
        tracing::debug!(username = %username, "Requesting password-realm grant");

        let body = serde_json::json!({
            "grant_type": GRANT_PASSWORD_REALM,
            "username": username,
            "password": password,
            "realm": self.connection,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "scope": scope,
        });

        let response = self
            .http
            .post(self.endpoint(PATH_TOKEN))
            .json(&body)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        parse_json(OPERATION, ensure_success(OPERATION, response).await?).await
    }

    /// Fetches the profile of the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, a rejected token, or
    /// an unparseable profile.
    pub async fn user_info(&self, access_token: &str) -> Result<UserInfo, ProviderError> {
        const OPERATION: &str = "userinfo";

        let response = self
            .http
            .get(self.endpoint(PATH_USERINFO))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        parse_json(OPERATION, ensure_success(OPERATION, response).await?).await
    }

    /// Triggers the password-reset email for `email`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure or a non-success status.
    pub async fn reset_password(&self, email: &str) -> Result<(), ProviderError> {
        const OPERATION: &str = "change_password";

        let body = serde_json::json!({
            "client_id": self.client_id,
            "email": email,
            "connection": self.connection,
        });

        let response = self
            .http
            .post(self.endpoint(PATH_CHANGE_PASSWORD))
            .json(&body)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        ensure_success(OPERATION, response).await.map(|_| ())
    }

    /// Exchanges `refresh_token` for a new ID/access token pair.
    ///
    /// Sent as a raw form POST so the provider does not rotate the refresh
    /// token.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, a rejected refresh
    /// token, or an unparseable response.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResult, ProviderError> {
        const OPERATION: &str = "refresh";

        let params = [
            ("grant_type", GRANT_REFRESH),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("scope", SCOPE_OPENID),
        ];

        let response = self
            .http
            .post(self.endpoint(PATH_TOKEN))
            .form(&params)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        parse_json(OPERATION, ensure_success(OPERATION, response).await?).await
    }

    /// Obtains a management API token for `audience` via the
    /// client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, a rejected grant, or a
    /// response without `access_token`.
    pub async fn client_credentials_token(&self, audience: &str) -> Result<String, ProviderError> {
        const OPERATION: &str = "client_credentials";

        let params = [
            ("grant_type", GRANT_CLIENT_CREDENTIALS),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("audience", audience),
        ];

        let response = self
            .http
            .post(self.endpoint(PATH_TOKEN))
            .form(&params)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        let token: AccessTokenResponse =
            parse_json(OPERATION, ensure_success(OPERATION, response).await?).await?;
        Ok(token.access_token)
    }

    /// Lists the users of the configured connection via the management API.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network failure, a rejected admin
    /// token, or an unparseable listing.
    pub async fn list_users(&self, admin_token: &str) -> Result<Vec<User>, ProviderError> {
        const OPERATION: &str = "list_users";

        let response = self
            .http
            .get(self.endpoint(PATH_USERS))
            .query(&[("connection", self.connection.as_str())])
            .bearer_auth(admin_token)
            .send()
            .await
            .map_err(|e| network(OPERATION, e))?;

        let users: Vec<ManagedUser> =
            parse_json(OPERATION, ensure_success(OPERATION, response).await?).await?;
        Ok(users.into_iter().map(User::from).collect())
    }
}

fn network(operation: &'static str, err: reqwest::Error) -> ProviderError {
    ProviderError::Network {
        operation,
        message: err.to_string(),
    }
}

/// Checks HTTP response status; returns the response on success or an error with details.
async fn ensure_success(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Http {
        operation,
        status,
        body,
    })
}

async fn parse_json<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let body = response.text().await.map_err(|e| network(operation, e))?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
        operation,
        message: e.to_string(),
    })
}
