use super::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// City name reported for a device whose city reference does not resolve
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Kind of networked device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Router,
    Sensor,
    Camera,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Router, DeviceType::Sensor, DeviceType::Camera];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Router => "router",
            DeviceType::Sensor => "sensor",
            DeviceType::Camera => "camera",
        }
    }
}

/// Device health status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Warning,
    Offline,
}

impl DeviceStatus {
    pub const ALL: [DeviceStatus; 3] = [
        DeviceStatus::Online,
        DeviceStatus::Warning,
        DeviceStatus::Offline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Warning => "warning",
            DeviceStatus::Offline => "offline",
        }
    }
}

/// Returned when a string names no known device type or status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for DeviceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for DeviceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceStatus::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device record as stored.
///
/// `status` is plain text: the store keeps whatever it is handed, and
/// validation against [`DeviceStatus`] happens at the API boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    /// External device code, e.g. "MON-RT-001"
    pub device_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: String,
    pub city_id: i64,
    #[serde(with = "iso_millis")]
    pub last_updated: DateTime<Utc>,
    /// JSON-encoded key/value text; keys depend on the device type
    pub metadata: String,
}

/// Fields supplied when creating a device; the store assigns the id.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    pub device_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: String,
    pub city_id: i64,
    /// Defaults to the creation time when absent
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub metadata: String,
}

/// Device enriched with its city's display name and a formatted timestamp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceWithCity {
    pub id: i64,
    pub name: String,
    pub device_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub status: String,
    pub city_id: i64,
    pub city_name: String,
    /// ISO-8601 timestamp of the last status change
    pub last_updated: String,
    pub metadata: String,
}

impl DeviceWithCity {
    /// Enrich a stored device with its city name (or [`UNKNOWN_CITY`]).
    pub fn new(device: &Device, city_name: Option<&str>) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            device_id: device.device_id.clone(),
            device_type: device.device_type,
            status: device.status.clone(),
            city_id: device.city_id,
            city_name: city_name.unwrap_or(UNKNOWN_CITY).to_string(),
            last_updated: iso_millis::format(&device.last_updated),
            metadata: device.metadata.clone(),
        }
    }

    /// Parsed status, or None if the stored text is not a known status
    pub fn parsed_status(&self) -> Option<DeviceStatus> {
        self.status.parse().ok()
    }

    /// Parsed last-update timestamp
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Look up one key of the metadata payload as display text.
    ///
    /// Returns None when the payload is not a JSON object or lacks the key.
    pub fn metadata_value(&self, key: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.metadata).ok()?;
        match value.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
