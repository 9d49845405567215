//! Session credentials consumed by authenticated requests.
//!
//! The client only ever reads credentials. Writing them (after a login, on
//! logout) is the host's job; `CredentialStore` is a ready-made place to do
//! that.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Key under which the logged-in username is stored.
pub const USER_KEY: &str = "user";
/// Key under which the bearer token is stored.
pub const TOKEN_KEY: &str = "token";

/// Read access to the current session's username and token.
///
/// Consulted immediately before every authenticated request is built.
pub trait CredentialProvider: Send + Sync {
    fn username(&self) -> Option<String>;
    fn token(&self) -> Option<String>;
}

/// Fixed credentials, useful for scripts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    pub username: Option<String>,
    pub token: Option<String>,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            token: Some(token.into()),
        }
    }

    /// Credentials with neither a username nor a token.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl CredentialProvider for StaticCredentials {
    fn username(&self) -> Option<String> {
        self.username.clone()
    }

    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// In-memory key-value store shared between the host and the client.
#[derive(Debug, Default)]
pub struct CredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Store both session values at once, typically after a login.
    pub fn set_session(&self, username: impl Into<String>, token: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(USER_KEY.to_string(), username.into());
        entries.insert(TOKEN_KEY.to_string(), token.into());
    }
}

impl CredentialProvider for CredentialStore {
    fn username(&self) -> Option<String> {
        self.get(USER_KEY)
    }

    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }
}
