//! Tenant domain normalization.

use url::Url;

use crate::AuthResult;
use crate::error::AuthError;

const HTTPS: &str = "https://";
const HTTP: &str = "http://";

/// Normalizes a tenant domain into an `https://` base URL without a trailing
/// slash.
///
/// A bare host gets `https://` prepended and an `http://` scheme is upgraded
/// to `https://`. The result must parse as a URL with a host; loopback and
/// single-label hosts such as `localhost:8443` are accepted.
///
/// # Errors
///
/// Returns `AuthError::InvalidDomain` if the normalized value is not a valid
/// URL, has no host, carries credentials, or has a host that URL parsing
/// would rewrite (numeric shorthand, IDNA, empty labels).
pub fn normalize_domain(domain: &str) -> AuthResult<String> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(AuthError::invalid_domain(domain, "domain is empty"));
    }

    let full = if let Some(rest) = trimmed.strip_prefix(HTTP) {
        format!("{HTTPS}{rest}")
    } else if trimmed.starts_with(HTTPS) {
        trimmed.to_string()
    } else {
        format!("{HTTPS}{trimmed}")
    };

    let url = Url::parse(&full).map_err(|e| AuthError::invalid_domain(domain, e.to_string()))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AuthError::invalid_domain(domain, "missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() || authority(&full).contains('@') {
        return Err(AuthError::invalid_domain(
            domain,
            "credentials are not allowed",
        ));
    }
    if url
        .host_str()
        .is_some_and(|host| !host.eq_ignore_ascii_case(supplied_host(&full)))
    {
        return Err(AuthError::invalid_domain(domain, "host is not canonical"));
    }
    if url
        .domain()
        .is_some_and(|host| host.split('.').any(str::is_empty))
    {
        return Err(AuthError::invalid_domain(domain, "host has an empty label"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(AuthError::invalid_domain(
            domain,
            "query and fragment are not allowed",
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Authority component of an `https://` URL as written.
fn authority(full: &str) -> &str {
    let rest = full.strip_prefix(HTTPS).unwrap_or(full);
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

/// Host of an `https://` URL as written, without userinfo or port.
fn supplied_host(full: &str) -> &str {
    let authority = authority(full);
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.starts_with('[') {
        host.find(']').map_or(host, |end| &host[..=end])
    } else {
        host.split(':').next().unwrap_or_default()
    }
}

/// Expected `iss` claim for tokens minted by the tenant at `base_url`.
#[must_use]
pub fn issuer_for(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
