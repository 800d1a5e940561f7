//! Helper configuration.
//!
//! Configuration is always passed explicitly to [`BasicAuthHelper`](crate::BasicAuthHelper).
//! It can be built in code with [`Auth0Config::new`] or loaded from a TOML
//! file layered with environment overrides via [`loader::load_config`].
//!
//! # Example (TOML)
//!
//! ```toml
//! domain = "my-tenant.eu.auth0.com"
//! client_id = "abc123"
//! client_secret = "s3cr3t"
//! connection = "Username-Password-Authentication"
//! request_timeout = "10s"
//! leeway = 1
//! ```

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::AuthError;

/// Default clock skew tolerated by the token verifier, in seconds.
pub const DEFAULT_LEEWAY_SECS: u64 = 1;

/// Connection details for one Auth0 tenant and application.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Auth0Config {
    /// Tenant domain, with or without scheme (`my-tenant.auth0.com`).
    pub domain: String,

    /// Application client ID.
    pub client_id: String,

    /// Application client secret. Also the HMAC key for ID token signatures.
    pub client_secret: String,

    /// Database connection (realm) users log in against.
    pub connection: String,

    /// Overrides the scheme and host used for outbound requests.
    /// The expected token issuer is still derived from `domain`.
    pub api_base_url: Option<Url>,

    /// Per-request timeout for provider calls. Unset means no timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,

    /// Clock skew tolerated when checking `exp`/`nbf`/`iat`, in seconds.
    pub leeway: u64,
}

impl Default for Auth0Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            connection: String::new(),
            api_base_url: None,
            request_timeout: None,
            leeway: DEFAULT_LEEWAY_SECS,
        }
    }
}

impl fmt::Debug for Auth0Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth0Config")
            .field("domain", &self.domain)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("connection", &self.connection)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("leeway", &self.leeway)
            .finish()
    }
}

impl Auth0Config {
    /// Creates a configuration from the four required settings.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        connection: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            connection: connection.into(),
            ..Self::default()
        }
    }

    /// Sends provider requests to `url` instead of the tenant domain.
    #[must_use]
    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the verifier clock leeway in seconds.
    #[must_use]
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if any of `domain`, `client_id`,
    /// `client_secret` or `connection` is blank, and
    /// `ConfigError::InvalidValue` for a zero request timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("domain", &self.domain),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("connection", &self.connection),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name.to_string()));
            }
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),

    /// The configuration sources could not be read or merged.
    #[error("Failed to load configuration: {0}")]
    Load(String),
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        AuthError::configuration(err.to_string())
    }
}

pub mod loader {
    use super::{Auth0Config, ConfigError};
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// File picked up when no explicit path is given.
    pub const DEFAULT_CONFIG_FILE: &str = "easyauth0.toml";

    /// Environment prefix, e.g. `EASYAUTH0__CLIENT_ID=abc`.
    pub const ENV_PREFIX: &str = "EASYAUTH0";

    /// Loads configuration from an optional TOML file plus environment
    /// overrides, then validates it.
    ///
    /// A missing file is not an error; the environment alone may supply
    /// every setting.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be parsed, or the
    /// validation error from [`Auth0Config::validate`].
    pub fn load_config(path: Option<&str>) -> Result<Auth0Config, ConfigError> {
        let mut builder = Config::builder();
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__"),
        );

        let cfg = builder
            .build()
            .map_err(|e| ConfigError::Load(format!("config build error: {e}")))?;
        let merged: Auth0Config = cfg
            .try_deserialize()
            .map_err(|e| ConfigError::Load(format!("config deserialize error: {e}")))?;
        merged.validate()?;
        Ok(merged)
    }
}
