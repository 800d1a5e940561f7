//! In-process session tracking.
//!
//! Two mappings are kept side by side: `email -> Credentials` and
//! `access token -> email`. Every access token held by a record is also a key
//! of the reverse index pointing back at that record's email. Both maps live
//! behind one lock so each operation updates them together.
//!
//! Nothing here expires on its own. `expires_in` is stored for callers but
//! token validity is always re-checked by the verifier in
//! [`authorize`](crate::AuthHelper::authorize).

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::types::Credentials;

#[derive(Debug, Default)]
struct Sessions {
    by_email: HashMap<String, Credentials>,
    by_token: HashMap<String, String>,
}

/// Thread-safe store of active sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<Sessions>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the session for `credentials.user.email`.
    ///
    /// The access token of any session it replaces is dropped from the
    /// reverse index first, so a re-login invalidates the old token.
    pub fn record(&self, credentials: Credentials) {
        let mut sessions = self.inner.lock();
        let email = credentials.user.email.clone();

        if let Some(previous) = sessions.by_email.remove(&email) {
            sessions.by_token.remove(&previous.access_token);
        }

        sessions
            .by_token
            .insert(credentials.access_token.clone(), email.clone());
        sessions.by_email.insert(email, credentials);
    }

    /// Returns the first session whose refresh token equals `refresh_token`.
    ///
    /// Linear in the number of sessions.
    #[must_use]
    pub fn find_by_refresh_token(&self, refresh_token: &str) -> Option<Credentials> {
        if refresh_token.is_empty() {
            return None;
        }
        self.inner
            .lock()
            .by_email
            .values()
            .find(|c| c.refresh_token == refresh_token)
            .cloned()
    }

    /// Removes the session tracked under `access_token`.
    ///
    /// Returns `true` if the token was tracked.
    pub fn forget(&self, access_token: &str) -> bool {
        let mut sessions = self.inner.lock();
        let Some(email) = sessions.by_token.remove(access_token) else {
            return false;
        };

        // A stale reverse entry must not evict a newer session for the same user.
        if sessions
            .by_email
            .get(&email)
            .is_some_and(|c| c.access_token == access_token)
        {
            sessions.by_email.remove(&email);
        }
        true
    }

    /// Returns `true` if `access_token` belongs to a tracked session.
    #[must_use]
    pub fn contains(&self, access_token: &str) -> bool {
        self.inner.lock().by_token.contains_key(access_token)
    }

    /// Swaps in a new access token for the session holding `refresh_token`.
    ///
    /// The old access token leaves the reverse index, the new one enters it,
    /// and the record's `access_token` and `expires_in` are updated in place.
    /// The refresh token itself is left unchanged. Returns the updated record,
    /// or `None` if no session holds `refresh_token`.
    pub fn apply_refresh(
        &self,
        refresh_token: &str,
        access_token: &str,
        expires_in: u64,
    ) -> Option<Credentials> {
        // Sessions granted without a refresh token store an empty one.
        if refresh_token.is_empty() {
            return None;
        }
        let mut sessions = self.inner.lock();
        let Sessions { by_email, by_token } = &mut *sessions;

        let credentials = by_email
            .values_mut()
            .find(|c| c.refresh_token == refresh_token)?;

        by_token.remove(&credentials.access_token);
        by_token.insert(access_token.to_string(), credentials.user.email.clone());
        credentials.access_token = access_token.to_string();
        credentials.expires_in = expires_in;

        Some(credentials.clone())
    }

    /// Returns the session for `email`, if any.
    #[must_use]
    pub fn get(&self, email: &str) -> Option<Credentials> {
        self.inner.lock().by_email.get(email).cloned()
    }

    /// Number of tracked sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().by_email.len()
    }

    /// Returns `true` if no session is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().by_email.is_empty()
    }
}
