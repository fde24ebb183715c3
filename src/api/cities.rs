use super::error::{parse_id, ApiError};
use super::AppState;
use crate::model::{CityWithStatus, DeviceWithCity};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tracing::debug;

/// Create city API router
pub fn create_city_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/cities", get(list_cities))
        .route("/api/cities/:id", get(get_city))
        .route("/api/cities/:id/devices", get(list_city_devices))
        .with_state(state)
}

/// GET /api/cities - All cities with live device counts by status
async fn list_cities(State(state): State<Arc<AppState>>) -> Json<Vec<CityWithStatus>> {
    let cities = state.storage.list_cities();
    debug!(count = cities.len(), "Listed cities");
    Json(cities)
}

/// GET /api/cities/:id - One city with live device counts
async fn get_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CityWithStatus>, ApiError> {
    let id = parse_id(&id, ApiError::InvalidCityId)?;

    let city = state.storage.get_city(id).ok_or(ApiError::CityNotFound)?;

    Ok(Json(city))
}

/// GET /api/cities/:id/devices - Devices of one city
///
/// A known city without devices yields `[]`; an unknown city yields 404.
async fn list_city_devices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DeviceWithCity>>, ApiError> {
    let id = parse_id(&id, ApiError::InvalidCityId)?;

    let devices = state
        .storage
        .list_devices_for_city(id)
        .ok_or(ApiError::CityNotFound)?;

    Ok(Json(devices))
}
