//! Demo dataset: the Mexican cities shown on the dashboard and a handful
//! of randomly generated devices per city.

use crate::config::SeedConfig;
use crate::model::{DeviceStatus, DeviceType, NewCity, NewDevice};
use crate::storage::Storage;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use tracing::info;

/// (name, state, latitude, longitude)
pub const DEMO_CITIES: [(&str, &str, &str, &str); 13] = [
    ("Monterrey", "Nuevo León", "25.6866", "-100.3161"),
    ("Ciudad de México", "CDMX", "19.4326", "-99.1332"),
    ("Guadalajara", "Jalisco", "20.6597", "-103.3496"),
    ("Puebla", "Puebla", "19.0414", "-98.2063"),
    ("León", "Guanajuato", "21.1167", "-101.6833"),
    ("Torreón", "Coahuila", "25.5383", "-103.4526"),
    ("Ciudad Juárez", "Chihuahua", "31.6904", "-106.4245"),
    ("Tampico", "Tamaulipas", "22.2553", "-97.8686"),
    ("Nuevo Laredo", "Tamaulipas", "27.4769", "-99.5424"),
    ("Saltillo", "Coahuila", "25.4321", "-101.0053"),
    ("Ciudad Victoria", "Tamaulipas", "23.7369", "-99.1411"),
    ("Reynosa", "Tamaulipas", "26.0920", "-98.2852"),
    ("Durango", "Durango", "24.0277", "-104.6532"),
];

/// Weighted towards online
const STATUS_POOL: [DeviceStatus; 5] = [
    DeviceStatus::Online,
    DeviceStatus::Online,
    DeviceStatus::Online,
    DeviceStatus::Warning,
    DeviceStatus::Offline,
];

/// Device code prefix per type
fn code_prefix(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Router => "RT",
        DeviceType::Sensor => "ST",
        DeviceType::Camera => "CM",
    }
}

/// Model names available per type
fn model_names(device_type: DeviceType) -> [&'static str; 3] {
    match device_type {
        DeviceType::Router => ["Router XR-2000", "Router CR-1500", "Router WR-3000"],
        DeviceType::Sensor => [
            "Sensor Temp. PT-100",
            "Sensor Hum. SH-200",
            "Sensor Pres. SP-500",
        ],
        DeviceType::Camera => ["Cámara IP HD", "Cámara Domo 360", "Cámara Térmica"],
    }
}

/// Type-specific metadata payload, JSON-encoded
fn metadata<R: Rng + ?Sized>(device_type: DeviceType, rng: &mut R) -> String {
    let value = match device_type {
        DeviceType::Router => {
            let traffic: f64 = rng.gen_range(0.0..2.0);
            json!({ "traffic": format!("{:.1} GB/h", traffic) })
        }
        DeviceType::Sensor => {
            let reading: f64 = rng.gen_range(20.0..40.0);
            json!({ "value": format!("{:.1}°C", reading) })
        }
        DeviceType::Camera => json!({ "state": "Grabando" }),
    };
    value.to_string()
}

/// "{CITY3}-{PREFIX}-{NNN}": first three letters of the city, upper-cased
pub fn device_code(city_name: &str, device_type: DeviceType, index: usize) -> String {
    let city_prefix: String = city_name.chars().take(3).collect::<String>().to_uppercase();
    format!("{}-{}-{:03}", city_prefix, code_prefix(device_type), index)
}

/// What a seeding run created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub cities: usize,
    pub devices: usize,
}

/// Populate `storage` with the demo cities and random devices for each.
///
/// Each city receives between `min_devices_per_city` and
/// `max_devices_per_city` devices (inclusive; a max below min is treated as min).
pub fn seed_demo_data<R: Rng + ?Sized>(
    storage: &dyn Storage,
    config: &SeedConfig,
    rng: &mut R,
) -> SeedSummary {
    let min = config.min_devices_per_city;
    let max = config.max_devices_per_city.max(min);
    let mut summary = SeedSummary {
        cities: 0,
        devices: 0,
    };

    let cities: Vec<_> = DEMO_CITIES
        .iter()
        .map(|(name, state, lat, lon)| {
            storage.create_city(NewCity {
                name: name.to_string(),
                state: state.to_string(),
                latitude: lat.to_string(),
                longitude: lon.to_string(),
                device_count: 0,
            })
        })
        .collect();
    summary.cities = cities.len();

    for city in &cities {
        let count = rng.gen_range(min..=max);
        for index in 1..=count {
            let device_type = DeviceType::ALL[rng.gen_range(0..DeviceType::ALL.len())];
            let name = model_names(device_type)[rng.gen_range(0..3)];
            let status = STATUS_POOL
                .choose(rng)
                .copied()
                .unwrap_or(DeviceStatus::Online);
            let minutes_ago = rng.gen_range(0..60);

            storage.create_device(NewDevice {
                name: name.to_string(),
                device_id: device_code(&city.name, device_type, index),
                device_type,
                status: status.as_str().to_string(),
                city_id: city.id,
                last_updated: Some(Utc::now() - Duration::minutes(minutes_ago)),
                metadata: metadata(device_type, rng),
            });
            summary.devices += 1;
        }
    }

    info!(
        cities = summary.cities,
        devices = summary.devices,
        "Seeded demo data"
    );
    summary
}
