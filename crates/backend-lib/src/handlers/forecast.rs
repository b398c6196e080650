//! The protected sample resource.
use axum::{Extension, Json};
use weather_common::WeatherForecast;

use crate::forecast::{generate_forecast, FORECAST_DAYS};
use crate::middleware::AuthenticatedUser;

/// `GET /protected-resource`, only reachable through [`crate::middleware::require_bearer`]
pub async fn weather_forecast(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<Vec<WeatherForecast>> {
    tracing::debug!(subject = %user.subject, token_id = %user.token_id, "serving forecast");
    let today = chrono::Local::now().date_naive();
    Json(generate_forecast(today, FORECAST_DAYS, &mut rand::rng()))
}
