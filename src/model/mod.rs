// City, device and user records plus the read-time views built from them

mod city;
mod device;
mod user;

pub use city::{City, CityWithStatus, NewCity, StatusCounts};
pub use device::{
    Device, DeviceStatus, DeviceType, DeviceWithCity, NewDevice, UnknownVariant,
    UNKNOWN_CITY,
};
pub use user::{NewUser, User};

/// Wire format for timestamps: ISO-8601 with millisecond precision and a `Z` suffix.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
