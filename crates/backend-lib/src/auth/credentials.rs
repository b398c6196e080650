//! Credential verification.
use async_trait::async_trait;

use crate::config::AuthSettings;

/// Source of truth for username/password checks.
///
/// `verify` answers only yes or no so callers cannot tell which field failed.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured credential pair
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.username.clone(), settings.password.clone())
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both comparisons regardless of the first result
        let username_ok = username == self.username;
        let password_ok = password == self.password;
        username_ok & password_ok
    }
}
