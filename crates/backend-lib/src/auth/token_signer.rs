// ============================
// crates/backend-lib/src/auth/token_signer.rs
// ============================
//! HS256 access token issuance and verification.
//!
//! Tokens are compact JWTs (`header.claims.signature`, each part base64url).
//! Verification is stateless: signature, issuer, audience and the validity
//! window are checked against the same [`JwtSettings`] used for signing.
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::error::{AppError, ConfigError};

/// Claims embedded in every access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (username)
    pub sub: String,
    /// Unique token id
    pub jti: String,
    /// Display name for generic identity consumers, same value as `sub`
    #[serde(rename = "unique_name")]
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Not before (unix seconds)
    pub nbf: i64,
    /// Expiry (unix seconds); the token is expired from this instant on
    pub exp: i64,
}

/// A signed access token together with the claims it carries
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub claims: AccessClaims,
}

/// Signs and verifies access tokens with one symmetric key
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime_secs: i64,
}

impl TokenSigner {
    /// Build a signer; weak or missing keys fail here, never per call
    pub fn new(settings: &JwtSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let lifetime_secs = i64::try_from(settings.expiration_seconds).map_err(|_| {
            ConfigError::Invalid("jwt.expiration_seconds is out of range".into())
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(settings.key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.key.as_bytes()),
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            lifetime_secs,
        })
    }

    /// Issue a token for `subject` valid from now
    pub fn issue(&self, subject: &str) -> Result<AccessToken, AppError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<AccessToken, AppError> {
        if subject.is_empty() {
            return Err(AppError::Internal(
                "cannot issue an access token for an empty subject".into(),
            ));
        }

        let claims = AccessClaims {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            name: subject.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(self.lifetime_secs),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(AccessToken { token, claims })
    }

    /// Verify a presented token against the current time
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a presented token as if the current time were `now` (unix seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> Result<AccessClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        // Time checks run below against the injected clock
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let claims = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::InvalidOrExpiredAccessToken(e.to_string()))?
            .claims;

        if now >= claims.exp {
            return Err(AppError::InvalidOrExpiredAccessToken("token expired".into()));
        }
        if now < claims.nbf {
            return Err(AppError::InvalidOrExpiredAccessToken(
                "token not yet valid".into(),
            ));
        }
        Ok(claims)
    }
}
