// ============================
// weather-backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are read once at startup and are immutable afterwards; handlers
//! share them behind an `Arc`.
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable prefix, nested keys are split on `__`
pub const ENV_PREFIX: &str = "WEATHER_";

/// Minimum HMAC-SHA-256 key length in bytes
pub const MIN_KEY_BYTES: usize = 32;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Listener settings
    pub server: ServerSettings,
    /// Access token signing settings
    pub jwt: JwtSettings,
    /// Credential pair and refresh token policy
    pub auth: AuthSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Optional directory served for unmatched routes
    pub static_dir: Option<PathBuf>,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Signing configuration shared by token issuance and verification
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// HMAC secret, never logged
    pub key: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime
    pub expiration_seconds: u64,
}

/// Credential pair and refresh token policy
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
    /// Lifetime of an issued refresh token
    pub refresh_token_ttl_secs: u64,
    /// How often expired refresh tokens are dropped from memory
    pub purge_interval_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, `RUST_LOG` wins when set
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            jwt: JwtSettings::default(),
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
            static_dir: None,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            issuer: "SecureWeatherApi".to_string(),
            audience: "SecureWeatherApi".to_string(),
            expiration_seconds: 900,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            username: "username".to_string(),
            password: "password".to_string(),
            refresh_token_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            purge_interval_secs: 60 * 60,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("purge_interval_secs", &self.purge_interval_secs)
            .finish()
    }
}

impl Settings {
    /// Load settings from `config.toml` / `config.json` in the working
    /// directory, then `WEATHER_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(
            Self::base()
                .merge(Toml::file("config.toml"))
                .merge(Json::file("config.json")),
        )
    }

    /// Load settings from an explicit TOML file, then `WEATHER_*` environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.display().to_string()));
        }
        Self::extract(Self::base().merge(Toml::file(path)))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;

        if self.auth.username.is_empty() {
            return Err(ConfigError::Invalid("auth.username must not be empty".into()));
        }
        if self.auth.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "auth.refresh_token_ttl_secs must be greater than zero".into(),
            ));
        }
        if self.auth.purge_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "auth.purge_interval_secs must be greater than zero".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of {LOG_LEVELS:?}"
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(
                "logging.format must be `pretty` or `json`".into(),
            ));
        }
        self.bind_addr()?;
        Ok(())
    }

    /// Socket address the server listens on
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(format!(
                    "server address {}:{} is not a valid socket address",
                    self.server.host, self.server.port
                ))
            })
    }
}

impl JwtSettings {
    /// Key, issuer, audience and lifetime checks; key length follows HS256 minimum strength
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::MissingSigningKey);
        }
        if self.key.len() < MIN_KEY_BYTES {
            return Err(ConfigError::WeakSigningKey {
                actual: self.key.len(),
                min: MIN_KEY_BYTES,
            });
        }
        if self.issuer.is_empty() {
            return Err(ConfigError::Invalid("jwt.issuer must not be empty".into()));
        }
        if self.audience.is_empty() {
            return Err(ConfigError::Invalid("jwt.audience must not be empty".into()));
        }
        if self.expiration_seconds == 0 {
            return Err(ConfigError::Invalid(
                "jwt.expiration_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
