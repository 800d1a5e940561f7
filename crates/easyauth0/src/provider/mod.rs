//! Identity provider access.
//!
//! - [`client`] - HTTP calls to the tenant (login, user info, password reset,
//!   refresh, client-credentials grant, user listing)
//! - [`domain`] - tenant domain normalization
//! - [`verifier`] - ID token verification

pub mod client;
pub mod domain;
pub mod verifier;

pub use client::Auth0Client;
pub use domain::{issuer_for, normalize_domain};
pub use verifier::{IdTokenClaims, TokenVerifier, VerifyError};

/// Errors returned by remote provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be sent or the response not received.
    #[error("{operation}: network error: {message}")]
    Network {
        /// Operation that failed.
        operation: &'static str,
        /// Underlying transport error.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{operation}: HTTP {status}: {body}")]
    Http {
        /// Operation that failed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, usually an OAuth error document.
        body: String,
    },

    /// The response body could not be parsed.
    #[error("{operation}: invalid response: {message}")]
    Parse {
        /// Operation that failed.
        operation: &'static str,
        /// Parser error.
        message: String,
    },
}

impl ProviderError {
    /// HTTP status of the provider response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
