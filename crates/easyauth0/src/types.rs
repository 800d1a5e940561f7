//! Data model shared by the provider client, session store and facade.

use serde::{Deserialize, Serialize};

/// A logged-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Short handle shown in UIs.
    pub nickname: String,
    /// Full display name.
    pub display_name: String,
    /// Email address. Sessions are keyed by it.
    pub email: String,
}

impl User {
    /// Creates a new user record.
    #[must_use]
    pub fn new(
        nickname: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}

/// Credentials tracked for one logged-in user.
///
/// `access_token` is the token callers present as `Bearer` to
/// [`authorize`](crate::AuthHelper::authorize); `refresh_token` is the one
/// they present to [`refresh`](crate::AuthHelper::refresh).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of `access_token` in seconds, as advertised by the provider.
    /// Stored only; never enforced locally.
    pub expires_in: u64,
}

/// Token bundle returned by the password-realm grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenSet {
    /// Token tracked as the session's access token: the signed ID token when
    /// present, otherwise the raw access token.
    #[must_use]
    pub fn session_token(&self) -> &str {
        self.id_token.as_deref().unwrap_or(&self.access_token)
    }
}

/// Parsed body of a refresh-token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResult {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// Present when the provider rotates refresh tokens. Ignored: refresh
    /// tokens are kept constant across refreshes.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl RefreshResult {
    /// Token that replaces the session's access token.
    #[must_use]
    pub fn session_token(&self) -> &str {
        self.id_token.as_deref().unwrap_or(&self.access_token)
    }
}

/// Profile returned by the `/userinfo` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub name: String,
}

impl From<UserInfo> for User {
    fn from(info: UserInfo) -> Self {
        User::new(info.nickname, info.name, info.email)
    }
}

/// One entry of the management API user listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ManagedUser {
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<ManagedUser> for User {
    fn from(user: ManagedUser) -> Self {
        let display_name = user.username.or(user.name).unwrap_or_default();
        User::new(user.nickname, display_name, user.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_set_prefers_id_token() {
        let tokens: TokenSet = serde_json::from_value(serde_json::json!({
            "access_token": "opaque",
            "id_token": "a.b.c",
            "refresh_token": "r1",
            "expires_in": 86400,
            "token_type": "Bearer"
        }))
        .unwrap();
        assert_eq!(tokens.session_token(), "a.b.c");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));

        let tokens: TokenSet =
            serde_json::from_value(serde_json::json!({ "access_token": "opaque" })).unwrap();
        assert_eq!(tokens.session_token(), "opaque");
        assert_eq!(tokens.expires_in, 0);
    }

    #[test]
    fn test_refresh_result_requires_expiry() {
        let parsed = serde_json::from_value::<RefreshResult>(serde_json::json!({
            "access_token": "opaque"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_user_from_user_info() {
        let info: UserInfo = serde_json::from_value(serde_json::json!({
            "email": "alice@example.com",
            "nickname": "alice",
            "name": "Alice Liddell",
            "sub": "auth0|123"
        }))
        .unwrap();
        let user = User::from(info);
        assert_eq!(user, User::new("alice", "Alice Liddell", "alice@example.com"));
    }

    #[test]
    fn test_managed_user_display_name_fallback() {
        let with_username: ManagedUser = serde_json::from_value(serde_json::json!({
            "email": "bob@example.com",
            "nickname": "bob",
            "username": "bobby",
            "name": "Bob"
        }))
        .unwrap();
        assert_eq!(User::from(with_username).display_name, "bobby");

        let name_only: ManagedUser = serde_json::from_value(serde_json::json!({
            "email": "bob@example.com",
            "nickname": "bob",
            "name": "Bob"
        }))
        .unwrap();
        assert_eq!(User::from(name_only).display_name, "Bob");
    }
}
