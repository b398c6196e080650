//! HTTP handlers: thin translation between requests and [`crate::auth::AuthService`].

pub mod auth;
pub mod forecast;

pub use auth::{login, refresh};
pub use forecast::weather_forecast;
