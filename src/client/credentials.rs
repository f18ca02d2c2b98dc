//! Credential persistence
//!
//! The upstream API mints a bearer token at sign-in. It is persisted in two
//! client-side cookies (the token itself plus an auth-state flag), attached
//! to outgoing requests, and cleared when the upstream answers 401.

use std::sync::Arc;

use parking_lot::RwLock;

/// Cookie holding the bearer token
pub const AUTH_COOKIE: &str = "auth";

/// Cookie flagging an authenticated session
pub const AUTH_STATE_COOKIE: &str = "auth_state";

/// Shared store for the current bearer token
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    /// Store with no credentials
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a token (e.g. read back from cookies)
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Persist a freshly minted token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// `Authorization` header value, when authenticated
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Whether a token is currently stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Drop stored credentials (unauthorized response handling)
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// `Set-Cookie` pairs reflecting the current state
    ///
    /// An authenticated store yields the token and the auth-state flag; a
    /// cleared store yields empty values so the browser drops both cookies.
    #[must_use]
    pub fn cookie_pairs(&self) -> [(&'static str, String); 2] {
        match self.token.read().as_ref() {
            Some(token) => [
                (AUTH_COOKIE, token.clone()),
                (AUTH_STATE_COOKIE, "true".to_string()),
            ],
            None => [(AUTH_COOKIE, String::new()), (AUTH_STATE_COOKIE, String::new())],
        }
    }

    /// Read the token back from a request `Cookie` header
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let token = header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        });
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_formatting() {
        let store = CredentialStore::with_token("abc123");
        assert_eq!(store.bearer().as_deref(), Some("Bearer abc123"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_shared_across_clones() {
        let store = CredentialStore::with_token("abc123");
        let clone = store.clone();

        clone.clear();
        assert!(!store.is_authenticated());
        assert!(store.bearer().is_none());
    }

    #[test]
    fn test_cookie_pairs() {
        let store = CredentialStore::with_token("tok");
        assert_eq!(
            store.cookie_pairs(),
            [("auth", "tok".to_string()), ("auth_state", "true".to_string())]
        );

        store.clear();
        assert_eq!(
            store.cookie_pairs(),
            [("auth", String::new()), ("auth_state", String::new())]
        );
    }

    #[test]
    fn test_from_cookie_header() {
        let store = CredentialStore::from_cookie_header("theme=dark; auth=tok; auth_state=true");
        assert_eq!(store.bearer().as_deref(), Some("Bearer tok"));

        let anonymous = CredentialStore::from_cookie_header("theme=dark");
        assert!(!anonymous.is_authenticated());
    }
}
