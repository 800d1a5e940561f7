//! Header-driven authentication facade.
//!
//! [`BasicAuthHelper`] takes raw `Authorization` header values, talks to the
//! tenant through [`Auth0Client`] and keeps the [`SessionStore`] in step.
//!
//! | Operation | Header                          |
//! |-----------|---------------------------------|
//! | login     | `Basic base64(user:password)`   |
//! | logout    | `Bearer <access token>`         |
//! | authorize | `Bearer <access token>`         |
//! | refresh   | `Bearer <refresh token>`        |
//!
//! # Example
//!
//! ```ignore
//! use easyauth0::{Auth0Config, AuthHelper, BasicAuthHelper};
//!
//! let helper = BasicAuthHelper::new(Auth0Config::new(
//!     "my-tenant.auth0.com",
//!     "client-id",
//!     "client-secret",
//!     "Username-Password-Authentication",
//! ))?;
//!
//! let creds = helper.login(&basic_header).await?;
//! assert!(helper.authorize(&format!("Bearer {}", creds.access_token)).await?);
//! ```

use async_trait::async_trait;

use crate::AuthResult;
use crate::config::Auth0Config;
use crate::error::AuthError;
use crate::header;
use crate::provider::Auth0Client;
use crate::session::SessionStore;
use crate::types::{Credentials, User};

/// Scopes requested on login; `offline_access` yields a refresh token.
pub const LOGIN_SCOPE: &str = "openid offline_access";

/// Authentication operations driven by `Authorization` header values.
#[async_trait]
pub trait AuthHelper: Send + Sync {
    /// Logs a user in from a `Basic` header and starts tracking the session.
    async fn login(&self, auth_header: &str) -> AuthResult<Credentials>;

    /// Stops tracking the session of a `Bearer` access token.
    /// Returns `false` if the token was not tracked.
    async fn logout(&self, auth_header: &str) -> AuthResult<bool>;

    /// Returns `true` if the `Bearer` token verifies and belongs to a
    /// tracked session.
    async fn authorize(&self, auth_header: &str) -> AuthResult<bool>;

    /// Exchanges a `Bearer` refresh token for a new access token.
    /// Returns `None` if no tracked session holds the refresh token.
    async fn refresh(&self, auth_header: &str) -> AuthResult<Option<Credentials>>;

    /// Starts a password reset for `email`. Never reveals whether the email
    /// exists.
    async fn reset(&self, email: &str) -> bool;

    /// Lists the users of the configured connection through the management
    /// API identified by `audience`.
    async fn mails(&self, audience: &str) -> AuthResult<Vec<User>>;
}

/// [`AuthHelper`] backed by an Auth0 tenant and an in-process session store.
pub struct BasicAuthHelper {
    client: Auth0Client,
    sessions: SessionStore,
}

impl BasicAuthHelper {
    /// Creates a helper for the tenant described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidDomain` or `AuthError::Configuration` if
    /// the client cannot be built.
    pub fn new(config: Auth0Config) -> AuthResult<Self> {
        Ok(Self::with_client(Auth0Client::new(&config)?))
    }

    /// Creates a helper around an existing client.
    #[must_use]
    pub fn with_client(client: Auth0Client) -> Self {
        Self {
            client,
            sessions: SessionStore::new(),
        }
    }

    /// Underlying provider client.
    #[must_use]
    pub fn client(&self) -> &Auth0Client {
        &self.client
    }

    /// Tracked sessions.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    async fn login_with_password(&self, username: &str, password: &str) -> AuthResult<Credentials> {
        let tokens = self
            .client
            .login(username, password, LOGIN_SCOPE)
            .await
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "Login rejected");
                AuthError::login_failed(e.to_string())
            })?;

        let info = self
            .client
            .user_info(&tokens.access_token)
            .await
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "User info lookup failed");
                AuthError::login_failed(e.to_string())
            })?;

        let credentials = Credentials {
            user: User::from(info),
            access_token: tokens.session_token().to_string(),
            refresh_token: tokens.refresh_token.clone().unwrap_or_default(),
            expires_in: tokens.expires_in,
        };
        self.sessions.record(credentials.clone());

        tracing::info!(email = %credentials.user.email, "User logged in");
        Ok(credentials)
    }
}

#[async_trait]
impl AuthHelper for BasicAuthHelper {
    async fn login(&self, auth_header: &str) -> AuthResult<Credentials> {
        let decoded = header::basic_value(auth_header).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected login header");
        })?;
        let (username, password) = header::split_credentials(&decoded).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected login header");
        })?;

        self.login_with_password(&username, &password).await
    }

    async fn logout(&self, auth_header: &str) -> AuthResult<bool> {
        let token = header::bearer_token(auth_header)?;
        let removed = self.sessions.forget(&token);
        if removed {
            tracing::info!("User logged out");
        } else {
            tracing::debug!("Logout for untracked token");
        }
        Ok(removed)
    }

    async fn authorize(&self, auth_header: &str) -> AuthResult<bool> {
        let token = header::bearer_token(auth_header)?;

        if let Err(e) = self.client.verify(&token) {
            tracing::debug!(error = %e, "Token verification failed");
            return Ok(false);
        }

        Ok(self.sessions.contains(&token))
    }

    async fn refresh(&self, auth_header: &str) -> AuthResult<Option<Credentials>> {
        let refresh_token = header::bearer_token(auth_header)?;

        let result = self
            .client
            .refresh_token(&refresh_token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh request failed");
                AuthError::refresh_failed(e.to_string())
            })?;

        let updated = self.sessions.apply_refresh(
            &refresh_token,
            result.session_token(),
            result.expires_in,
        );
        match &updated {
            Some(credentials) => {
                tracing::info!(email = %credentials.user.email, "Access token refreshed");
            }
            None => tracing::debug!("Refresh succeeded for an untracked session"),
        }
        Ok(updated)
    }

    async fn reset(&self, email: &str) -> bool {
        match self.client.reset_password(email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Password reset request failed");
                false
            }
        }
    }

    async fn mails(&self, audience: &str) -> AuthResult<Vec<User>> {
        let admin_token = self
            .client
            .client_credentials_token(audience)
            .await
            .map_err(|e| {
                tracing::warn!(audience = %audience, error = %e, "Management token request failed");
                AuthError::admin_token(e.to_string())
            })?;

        self.client.list_users(&admin_token).await.map_err(|e| {
            tracing::warn!(error = %e, "User listing failed");
            AuthError::user_listing(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> BasicAuthHelper {
        BasicAuthHelper::new(Auth0Config::new(
            "tenant.auth0.com",
            "client-id",
            "client-secret",
            "db",
        ))
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_domain() {
        let result = BasicAuthHelper::new(Auth0Config::new("bad domain", "id", "secret", "db"));
        assert!(matches!(result, Err(AuthError::InvalidDomain { .. })));
    }

    #[test]
    fn test_authorize_rejects_fake_token() {
        let helper = helper();
        let authorized = tokio_test::block_on(helper.authorize("Bearer x.y.z")).unwrap();
        assert!(!authorized);
    }

    #[test]
    fn test_authorize_propagates_header_errors() {
        let helper = helper();
        let err = tokio_test::block_on(helper.authorize("Token abc")).unwrap_err();
        assert!(matches!(err, AuthError::HeaderFormat { .. }));
    }

    #[test]
    fn test_logout_untracked_token() {
        let helper = helper();
        assert!(!tokio_test::block_on(helper.logout("Bearer never-issued")).unwrap());
    }

    #[test]
    fn test_login_header_errors_do_not_reach_provider() {
        let helper = helper();

        let err = tokio_test::block_on(helper.login("Bearer abc")).unwrap_err();
        assert!(matches!(err, AuthError::HeaderFormat { .. }));

        let err = tokio_test::block_on(helper.login("Basic %%%")).unwrap_err();
        assert!(matches!(err, AuthError::HeaderEncoding { .. }));

        // "no-colon" in base64
        let err = tokio_test::block_on(helper.login("Basic bm8tY29sb24=")).unwrap_err();
        assert!(matches!(err, AuthError::HeaderFormat { .. }));

        assert!(helper.sessions().is_empty());
    }
}
