use async_trait::async_trait;

use super::AccessToken;
use crate::error::AppError;

/// Tokens handed out by a successful login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue an access + refresh token pair.
    /// Fails with [`AppError::Unauthorized`] without touching refresh state.
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError>;

    /// Exchange a known refresh token for a new access token.
    /// Fails with [`AppError::InvalidRefreshToken`]; never mutates state.
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AppError>;
}
