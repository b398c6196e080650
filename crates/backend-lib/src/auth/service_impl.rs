use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;

use crate::auth::{AccessToken, AuthService, CredentialVerifier, RefreshStore, TokenPair, TokenSigner};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILURE, LOGIN_SUCCESS, REFRESH_FAILURE, REFRESH_SUCCESS};

pub struct DefaultAuth {
    signer: Arc<TokenSigner>,
    refresh_tokens: Arc<RefreshStore>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl DefaultAuth {
    pub fn new(
        signer: Arc<TokenSigner>,
        refresh_tokens: Arc<RefreshStore>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            signer,
            refresh_tokens,
            credentials,
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        if !self.credentials.verify(username, password).await {
            counter!(LOGIN_FAILURE).increment(1);
            tracing::warn!("login rejected");
            return Err(AppError::Unauthorized);
        }

        // Sign first so a signing failure leaves no orphan refresh token
        let access_token = self.signer.issue(username)?;
        let refresh_token = self.refresh_tokens.issue(username);

        counter!(LOGIN_SUCCESS).increment(1);
        tracing::info!(token_id = %access_token.claims.jti, "login succeeded");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AppError> {
        let Some(subject) = self.refresh_tokens.lookup(refresh_token) else {
            counter!(REFRESH_FAILURE).increment(1);
            tracing::warn!("unknown or expired refresh token");
            return Err(AppError::InvalidRefreshToken);
        };

        let access_token = self.signer.issue(&subject)?;
        counter!(REFRESH_SUCCESS).increment(1);
        tracing::info!(subject = %subject, token_id = %access_token.claims.jti, "access token reissued");
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::config::JwtSettings;
    use std::time::Duration;

    struct Fixture {
        auth: DefaultAuth,
        signer: Arc<TokenSigner>,
        store: Arc<RefreshStore>,
    }

    fn fixture() -> Fixture {
        let signer = Arc::new(
            TokenSigner::new(&JwtSettings {
                key: "service-test-key-0123456789abcdef".to_string(),
                ..JwtSettings::default()
            })
            .unwrap(),
        );
        let store = Arc::new(RefreshStore::new(Duration::from_secs(3600)));
        let auth = DefaultAuth::new(
            signer.clone(),
            store.clone(),
            Arc::new(StaticCredentials::new("username", "password")),
        );
        Fixture { auth, signer, store }
    }

    #[tokio::test]
    async fn test_login_issues_both_tokens() {
        let f = fixture();
        let pair = f.auth.login("username", "password").await.unwrap();

        assert!(!pair.access_token.token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_eq!(f.signer.verify(&pair.access_token.token).unwrap().sub, "username");
        assert_eq!(f.store.lookup(&pair.refresh_token).as_deref(), Some("username"));
    }

    #[tokio::test]
    async fn test_bad_login_leaves_store_untouched() {
        let f = fixture();
        for (user, pass) in [("username", "nope"), ("nope", "password"), ("", "")] {
            assert!(matches!(
                f.auth.login(user, pass).await,
                Err(AppError::Unauthorized)
            ));
        }
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reissues_for_same_subject() {
        let f = fixture();
        let pair = f.auth.login("username", "password").await.unwrap();

        let renewed = f.auth.refresh(&pair.refresh_token).await.unwrap();
        assert_ne!(renewed.token, pair.access_token.token);
        assert_eq!(renewed.claims.sub, "username");

        // Refresh token remains usable
        assert!(f.auth.refresh(&pair.refresh_token).await.is_ok());
        assert_eq!(f.store.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_with_unknown_token() {
        let f = fixture();
        assert!(matches!(
            f.auth.refresh("not-a-real-token").await,
            Err(AppError::InvalidRefreshToken)
        ));
        assert!(f.store.is_empty());
    }
}
