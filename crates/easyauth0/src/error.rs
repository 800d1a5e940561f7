//! Error types for the Auth0 helper.
//!
//! [`AuthError`] is the taxonomy surfaced to applications. Lower layers use
//! narrower errors ([`ProviderError`](crate::provider::ProviderError),
//! [`VerifyError`](crate::provider::VerifyError)) which the facade maps onto
//! it at the point where the failure is logged.

use std::fmt;

/// Errors that can occur while talking to the identity provider or parsing
/// inbound `Authorization` headers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The tenant domain could not be normalized into a valid URL.
    #[error("Invalid domain '{domain}': {message}")]
    InvalidDomain {
        /// The domain as it was supplied.
        domain: String,
        /// Why it was rejected.
        message: String,
    },

    /// The `Authorization` header has the wrong scheme or shape.
    #[error("Invalid header format: {message}")]
    HeaderFormat {
        /// Description of what is wrong with the header.
        message: String,
    },

    /// The `Authorization` header payload is not valid base64 / UTF-8.
    #[error("Invalid header encoding: {message}")]
    HeaderEncoding {
        /// Description of the decoding failure.
        message: String,
    },

    /// The provider rejected the credentials, or the login round trip failed.
    #[error("Login failed: {message}")]
    LoginFailed {
        /// Underlying failure message.
        message: String,
    },

    /// The refresh request was rejected or its response could not be parsed.
    #[error("Refresh failed: {message}")]
    RefreshFailed {
        /// Underlying failure message.
        message: String,
    },

    /// The client-credentials grant for the management API failed.
    #[error("Admin token request failed: {message}")]
    AdminToken {
        /// Underlying failure message.
        message: String,
    },

    /// The management API user listing failed.
    #[error("User listing failed: {message}")]
    UserListing {
        /// Underlying failure message.
        message: String,
    },

    /// The helper configuration is incomplete or inconsistent.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidDomain` error.
    #[must_use]
    pub fn invalid_domain(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Creates a new `HeaderFormat` error.
    #[must_use]
    pub fn header_format(message: impl Into<String>) -> Self {
        Self::HeaderFormat {
            message: message.into(),
        }
    }

    /// Creates a new `HeaderEncoding` error.
    #[must_use]
    pub fn header_encoding(message: impl Into<String>) -> Self {
        Self::HeaderEncoding {
            message: message.into(),
        }
    }

    /// Creates a new `LoginFailed` error.
    #[must_use]
    pub fn login_failed(message: impl Into<String>) -> Self {
        Self::LoginFailed {
            message: message.into(),
        }
    }

    /// Creates a new `RefreshFailed` error.
    #[must_use]
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }

    /// Creates a new `AdminToken` error.
    #[must_use]
    pub fn admin_token(message: impl Into<String>) -> Self {
        Self::AdminToken {
            message: message.into(),
        }
    }

    /// Creates a new `UserListing` error.
    #[must_use]
    pub fn user_listing(message: impl Into<String>) -> Self {
        Self::UserListing {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the inbound `Authorization` header was malformed.
    #[must_use]
    pub fn is_header_error(&self) -> bool {
        matches!(self, Self::HeaderFormat { .. } | Self::HeaderEncoding { .. })
    }

    /// Returns `true` if the failure came from a remote provider call.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::LoginFailed { .. }
                | Self::RefreshFailed { .. }
                | Self::AdminToken { .. }
                | Self::UserListing { .. }
        )
    }

    /// Returns `true` if the error prevents the client from being built.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidDomain { .. } | Self::Configuration { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDomain { .. } => ErrorCategory::Configuration,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::HeaderFormat { .. } => ErrorCategory::Header,
            Self::HeaderEncoding { .. } => ErrorCategory::Header,
            Self::LoginFailed { .. } => ErrorCategory::Authentication,
            Self::RefreshFailed { .. } => ErrorCategory::Token,
            Self::AdminToken { .. } => ErrorCategory::Management,
            Self::UserListing { .. } => ErrorCategory::Management,
        }
    }
}

/// Categories of helper errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Construction-time configuration problems.
    Configuration,
    /// Malformed inbound `Authorization` headers.
    Header,
    /// Credential checks against the provider.
    Authentication,
    /// Token exchange and refresh.
    Token,
    /// Management API access.
    Management,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Header => write!(f, "header"),
            Self::Authentication => write!(f, "authentication"),
            Self::Token => write!(f, "token"),
            Self::Management => write!(f, "management"),
        }
    }
}
