use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::any::Any;
use tracing::error;

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

/// API error types shared by the city and device routers
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    InvalidCityId,
    InvalidDeviceId,
    InvalidStatus,
    CityNotFound,
    DeviceNotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidCityId => (StatusCode::BAD_REQUEST, "Invalid city ID"),
            ApiError::InvalidDeviceId => (StatusCode::BAD_REQUEST, "Invalid device ID"),
            ApiError::InvalidStatus => (
                StatusCode::BAD_REQUEST,
                "Invalid status. Must be one of: online, warning, offline",
            ),
            ApiError::CityNotFound => (StatusCode::NOT_FOUND, "City not found"),
            ApiError::DeviceNotFound => (StatusCode::NOT_FOUND, "Device not found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorResponse {
            message: message.to_string(),
        });

        (status, body).into_response()
    }
}

/// Parse a path segment as a record id
///
/// The whole segment must be an integer: `"12abc"` is rejected rather than read as 12.
pub(crate) fn parse_id(raw: &str, invalid: ApiError) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| invalid)
}

/// Turn a handler panic into the generic 500 body. Used with `CatchPanicLayer`.
pub(crate) fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Request handler panicked");
    ApiError::Internal.into_response()
}
