// ============================
// weather-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module: access token signing, refresh token bookkeeping,
//! credential verification and the login/refresh orchestration on top.

pub mod credentials;
pub mod refresh_store;
mod token_generator;
pub mod token_signer;
mod service;
mod service_impl;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use refresh_store::RefreshStore;
pub use service::{AuthService, TokenPair};
pub use service_impl::DefaultAuth;
pub use token_signer::{AccessClaims, AccessToken, TokenSigner};
