//! # easyauth0
//!
//! Backend helpers for applications that authenticate users against an
//! Auth0 tenant.
//!
//! This crate provides:
//! - Login from `Basic` headers via the password-realm grant
//! - Logout and authorization checks from `Bearer` headers
//! - Access token refresh with a constant refresh token
//! - Password reset triggers
//! - User listing through the management API
//!
//! It is a client only: tokens are issued by the tenant and verified locally
//! (HS256 with the client secret). Active sessions are tracked in memory.
//!
//! ## Modules
//!
//! - [`config`] - Helper configuration and layered loading
//! - [`error`] - Error taxonomy
//! - [`header`] - `Authorization` header parsing
//! - [`helper`] - The [`AuthHelper`] facade
//! - [`provider`] - Tenant HTTP client, domain normalization, token verifier
//! - [`session`] - In-process session store
//! - [`types`] - Users, credentials and provider payloads

pub mod config;
pub mod error;
pub mod header;
pub mod helper;
pub mod provider;
pub mod session;
pub mod types;

pub use config::{Auth0Config, ConfigError};
pub use error::{AuthError, ErrorCategory};
pub use helper::{AuthHelper, BasicAuthHelper, LOGIN_SCOPE};
pub use provider::{Auth0Client, ProviderError, TokenVerifier, VerifyError};
pub use session::SessionStore;
pub use types::{Credentials, User};

/// Type alias for helper results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use easyauth0::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{Auth0Config, ConfigError};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::helper::{AuthHelper, BasicAuthHelper};
    pub use crate::session::SessionStore;
    pub use crate::types::{Credentials, User};
}
