//! Display helpers for the info panel and CLI output.

use chrono::{DateTime, Utc};
use devmap::model::{DeviceStatus, DeviceType};

/// Compact age of a timestamp relative to `now`: "justo ahora", "12m", "3h", "2d".
pub fn format_time_difference(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();

    if minutes < 1 {
        "justo ahora".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / 1440)
    }
}

/// Human label for a raw status string
pub fn status_text(status: &str) -> &'static str {
    match status.parse::<DeviceStatus>() {
        Ok(DeviceStatus::Online) => "En línea",
        Ok(DeviceStatus::Warning) => "Advertencia",
        Ok(DeviceStatus::Offline) => "Fuera de línea",
        Err(_) => "Desconocido",
    }
}

/// Hex colour for a raw status string
pub fn status_color(status: &str) -> &'static str {
    match status.parse::<DeviceStatus>() {
        Ok(DeviceStatus::Online) => "#34A853",
        Ok(DeviceStatus::Warning) => "#FBBC04",
        Ok(DeviceStatus::Offline) => "#EA4335",
        Err(_) => "#5F6368",
    }
}

/// Material icon name; offline devices share one icon regardless of type
pub fn device_icon(device_type: DeviceType, status: &str) -> &'static str {
    if status == DeviceStatus::Offline.as_str() {
        return "power_off";
    }
    match device_type {
        DeviceType::Router => "wifi",
        DeviceType::Sensor => "thermostat",
        DeviceType::Camera => "videocam",
    }
}
