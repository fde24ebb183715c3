use super::error::{parse_id, ApiError};
use super::AppState;
use crate::model::{Device, DeviceStatus, DeviceWithCity};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Request body for a status change
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// Create device API router
pub fn create_device_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/devices", get(list_devices))
        .route("/api/devices/:id", get(get_device))
        .route("/api/devices/:id/status", patch(update_device_status))
        .with_state(state)
}

/// GET /api/devices - All devices with their city name
async fn list_devices(State(state): State<Arc<AppState>>) -> Json<Vec<DeviceWithCity>> {
    let devices = state.storage.list_devices();
    debug!(count = devices.len(), "Listed devices");
    Json(devices)
}

/// GET /api/devices/:id - One device with its city name
async fn get_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeviceWithCity>, ApiError> {
    let id = parse_id(&id, ApiError::InvalidDeviceId)?;

    let device = state.storage.get_device(id).ok_or(ApiError::DeviceNotFound)?;

    Ok(Json(device))
}

/// PATCH /api/devices/:id/status - Change a device's status
///
/// Checks run in order: id format, status value, device existence.
/// A missing or malformed body counts as an invalid status.
async fn update_device_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> Result<Json<Device>, ApiError> {
    let id = parse_id(&id, ApiError::InvalidDeviceId)?;

    let status = body
        .ok()
        .and_then(|Json(request)| request.status)
        .and_then(|raw| raw.parse::<DeviceStatus>().ok())
        .ok_or(ApiError::InvalidStatus)?;

    let device = state
        .storage
        .update_device_status(id, status.as_str())
        .ok_or(ApiError::DeviceNotFound)?;

    info!(
        device_id = id,
        code = %device.device_id,
        status = %status,
        "Device status updated"
    );

    Ok(Json(device))
}
