// ============================
// weather-backend-lib/src/forecast.rs
// ============================
//! Sample payload behind the protected route.
use chrono::{Days, NaiveDate};
use rand::Rng;
use weather_common::WeatherForecast;

/// Number of days returned by the protected resource
pub const FORECAST_DAYS: u64 = 5;

/// Lowest generated temperature (inclusive)
pub const MIN_TEMPERATURE_C: i32 = -20;
/// Highest generated temperature (exclusive)
pub const MAX_TEMPERATURE_C: i32 = 55;

pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// One entry per day for the `days` days following `today`
pub fn generate_forecast<R: Rng + ?Sized>(
    today: NaiveDate,
    days: u64,
    rng: &mut R,
) -> Vec<WeatherForecast> {
    (1..=days)
        .map(|offset| {
            let summary = SUMMARIES[rng.random_range(0..SUMMARIES.len())];
            WeatherForecast::new(
                today + Days::new(offset),
                rng.random_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C),
                Some(summary.to_string()),
            )
        })
        .collect()
}
