// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between weather API clients and the server.
//! This module defines the JSON request and response bodies of the HTTP surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: a signed access token plus an opaque refresh token
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of `POST /refresh`
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful refresh; the refresh token itself stays valid
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// A single day of the protected forecast resource
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Day the forecast applies to, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Temperature in degrees Celsius
    pub temperature_c: i32,
    /// Temperature in degrees Fahrenheit, derived from `temperature_c`
    pub temperature_f: i32,
    /// Human readable label
    pub summary: Option<String>,
}

impl WeatherForecast {
    /// Build a forecast entry, deriving the Fahrenheit value
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: celsius_to_fahrenheit(temperature_c),
            summary,
        }
    }
}

/// Approximate conversion used by the forecast payload: `32 + trunc(c / 0.5556)`
pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    32 + (f64::from(celsius) / 0.5556) as i32
}
