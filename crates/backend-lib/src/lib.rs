// ============================
// weather-backend-lib/src/lib.rs
// ============================
//! Core functionality for the weather API server: access/refresh token
//! issuance, bearer verification and the protected forecast resource.

pub mod auth;
pub mod config;
pub mod error;
pub mod forecast;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthService, CredentialVerifier, DefaultAuth, RefreshStore, StaticCredentials, TokenSigner};
use crate::config::Settings;
use crate::error::ConfigError;

pub use crate::router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Login / refresh orchestration
    pub auth: Arc<dyn AuthService>,
    /// Access token signer, also used for bearer verification
    pub signer: Arc<TokenSigner>,
    /// Refresh token bookkeeping
    pub refresh_tokens: Arc<RefreshStore>,
    /// Settings, read-only after startup
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create the application state, checking the credential pair from settings
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let credentials = Arc::new(StaticCredentials::from_settings(&settings.auth));
        Self::with_credentials(settings, credentials)
    }

    /// Create the application state with a custom identity source
    pub fn with_credentials(
        settings: Settings,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let signer = Arc::new(TokenSigner::new(&settings.jwt)?);
        let refresh_tokens = Arc::new(RefreshStore::new(Duration::from_secs(
            settings.auth.refresh_token_ttl_secs,
        )));
        let auth = Arc::new(DefaultAuth::new(
            signer.clone(),
            refresh_tokens.clone(),
            credentials,
        ));

        Ok(Self {
            auth,
            signer,
            refresh_tokens,
            settings: Arc::new(settings),
        })
    }
}
