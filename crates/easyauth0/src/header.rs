//! `Authorization` header parsing.
//!
//! Extracts `Basic` credentials and `Bearer` tokens from raw header values.
//! Values are trimmed of ASCII control/space characters and of the
//! non-breaking space (U+00A0), which some clients emit after the scheme.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::AuthResult;
use crate::error::AuthError;

/// Scheme prefix for Basic credentials.
pub const BASIC_SCHEME: &str = "Basic";

/// Scheme prefix for Bearer tokens.
pub const BEARER_SCHEME: &str = "Bearer";

const NO_BREAK_SPACE: char = '\u{00A0}';

/// Standard alphabet, trailing `=` padding optional on decode.
const CREDENTIALS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn is_trimmable(c: char) -> bool {
    c <= ' ' || c == NO_BREAK_SPACE
}

/// Trims control characters, spaces and non-breaking spaces from both ends.
#[must_use]
pub fn trim(value: &str) -> &str {
    value.trim_matches(is_trimmable)
}

/// Returns the first credential token following `scheme` in `header`.
///
/// The raw header must begin with `scheme`; only the remainder is trimmed.
fn scheme_value<'a>(header: &'a str, scheme: &str) -> AuthResult<&'a str> {
    let rest = header.strip_prefix(scheme).ok_or_else(|| {
        tracing::debug!(scheme, "Authorization header has the wrong scheme");
        AuthError::header_format(format!(
            "Authorization header must start with '{scheme}'"
        ))
    })?;

    if !rest.starts_with(is_trimmable) {
        return Err(AuthError::header_format(format!(
            "Authorization header must start with '{scheme} '"
        )));
    }

    trim(rest)
        .split(is_trimmable)
        .find(|part| !part.is_empty())
        .ok_or_else(|| AuthError::header_format(format!("Missing {scheme} credentials")))
}

/// Extracts and base64-decodes the payload of a `Basic` header.
///
/// # Errors
///
/// Returns `HeaderFormat` if the header is not a `Basic` header, and
/// `HeaderEncoding` if the payload is not valid base64 or UTF-8.
pub fn basic_value(header: &str) -> AuthResult<String> {
    let encoded = scheme_value(header, BASIC_SCHEME)?;

    let decoded = CREDENTIALS_ENGINE.decode(encoded).map_err(|e| {
        tracing::debug!(error = %e, "Invalid base64 in Basic credentials");
        AuthError::header_encoding(format!("invalid base64: {e}"))
    })?;

    String::from_utf8(decoded)
        .map_err(|_| AuthError::header_encoding("decoded credentials are not valid UTF-8"))
}

/// Extracts the token of a `Bearer` header.
///
/// # Errors
///
/// Returns `HeaderFormat` if the header is not a `Bearer` header or carries
/// no token.
pub fn bearer_token(header: &str) -> AuthResult<String> {
    scheme_value(header, BEARER_SCHEME).map(str::to_string)
}

/// Splits decoded Basic credentials on the first `:` into user and password.
///
/// # Errors
///
/// Returns `HeaderFormat` if there is no `:` separator.
pub fn split_credentials(decoded: &str) -> AuthResult<(String, String)> {
    let (user, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::header_format("Credentials must be in format 'user:password'"))?;

    Ok((user.to_string(), password.to_string()))
}
