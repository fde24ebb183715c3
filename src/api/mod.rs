// HTTP API over the record store

pub mod cities;
pub mod devices;
mod error;

pub use cities::create_city_router;
pub use devices::create_device_router;
pub use error::ApiError;

use crate::config::ServerConfig;
use crate::storage::Storage;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for the city and device routers
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// Merge the city, device and health routes into one router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);
    Router::new()
        .route("/health", get(health))
        .merge(create_city_router(Arc::clone(&state)))
        .merge(create_device_router(state))
}

/// Full application: routes plus tracing, panic recovery and (optionally) CORS
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let mut app = create_router(state)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http());

    if server.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
