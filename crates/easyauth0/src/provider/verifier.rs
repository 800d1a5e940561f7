//! ID token verification.
//!
//! Tokens are HS256 JWTs signed with the application's client secret and
//! issued by `https://<tenant>/`. Only signature, issuer and time claims are
//! checked; the audience is not.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Errors that can occur while verifying a token.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token signature does not match the client secret.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token claims are invalid (issuer mismatch, missing claim, ...).
    #[error("Invalid claims: {message}")]
    InvalidClaims {
        /// Description of why claims are invalid.
        message: String,
    },

    /// The token is not a well-formed JWT.
    #[error("Malformed token: {message}")]
    Malformed {
        /// Description of the decoding error.
        message: String,
    },
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => Self::InvalidClaims {
                message: err.to_string(),
            },
            _ => Self::Malformed {
                message: err.to_string(),
            },
        }
    }
}

/// Claims read from a verified ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: u64,
}

/// HS256 verifier bound to one tenant issuer and client secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenVerifier {
    /// Creates a verifier for tokens issued by `issuer` and signed with
    /// `secret`, tolerating `leeway` seconds of clock skew.
    #[must_use]
    pub fn new(secret: &str, issuer: impl Into<String>, leeway: u64) -> Self {
        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.validate_aud = false;
        validation.leeway = leeway;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
        }
    }

    /// Expected `iss` claim.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Verifies signature, issuer and expiry of `token`.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] describing the first failed check.
    pub fn verify(&self, token: &str) -> Result<IdTokenClaims, VerifyError> {
        decode::<IdTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(VerifyError::from)
    }
}
