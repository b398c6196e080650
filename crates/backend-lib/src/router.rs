// ============================
// weather-backend-lib/src/router.rs
// ============================
//! HTTP router and layer stack.
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers;
use crate::middleware::require_bearer;
use crate::AppState;

/// Path of the protected sample resource
pub const PROTECTED_RESOURCE: &str = "/protected-resource";
/// Legacy path serving the same resource
pub const WEATHER_FORECAST: &str = "/weatherforecast";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(PROTECTED_RESOURCE, get(handlers::weather_forecast))
        .route(WEATHER_FORECAST, get(handlers::weather_forecast))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .merge(protected);

    if let Some(dir) = &state.settings.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
