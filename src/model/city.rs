use serde::{Deserialize, Serialize};

/// City record as stored.
///
/// `device_count` is carried for parity with the seed data but is never
/// authoritative: views recompute it from live device records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    /// Region label (state or province)
    pub state: String,
    /// Decimal degrees, kept as text
    pub latitude: String,
    pub longitude: String,
    pub device_count: i64,
}

/// Fields supplied when creating a city
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    pub name: String,
    pub state: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default)]
    pub device_count: i64,
}

/// Per-status tally of devices
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

impl StatusCounts {
    /// Count status strings. Values outside the three known statuses are ignored.
    pub fn tally<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                "online" => counts.online += 1,
                "warning" => counts.warning += 1,
                "offline" => counts.offline += 1,
                _ => {}
            }
        }
        counts
    }
}

/// City plus live device counts split by status
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWithStatus {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub latitude: String,
    pub longitude: String,
    /// Number of devices whose city reference matches this city
    pub device_count: usize,
    pub online_count: usize,
    pub warning_count: usize,
    pub offline_count: usize,
}

impl CityWithStatus {
    /// Build the view from a stored city and the live device total and tally.
    pub fn new(city: &City, device_count: usize, counts: StatusCounts) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            state: city.state.clone(),
            latitude: city.latitude.clone(),
            longitude: city.longitude.clone(),
            device_count,
            online_count: counts.online,
            warning_count: counts.warning,
            offline_count: counts.offline,
        }
    }

    /// Coordinates parsed as `(lat, lon)`, or None if either is not a number
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse().ok()?;
        let lon = self.longitude.trim().parse().ok()?;
        Some((lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_known_statuses_only() {
        let counts = StatusCounts::tally(["online", "online", "warning", "offline", "bogus"]);
        assert_eq!(
            counts,
            StatusCounts {
                online: 2,
                warning: 1,
                offline: 1
            }
        );
    }

    #[test]
    fn city_view_serializes_camel_case() {
        let city = City {
            id: 3,
            name: "Puebla".to_string(),
            state: "Puebla".to_string(),
            latitude: "19.0414".to_string(),
            longitude: "-98.2063".to_string(),
            device_count: 0,
        };
        let view = CityWithStatus::new(&city, 2, StatusCounts::tally(["online", "warning"]));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["deviceCount"], 2);
        assert_eq!(json["onlineCount"], 1);
        assert_eq!(json["warningCount"], 1);
        assert_eq!(json["offlineCount"], 0);
        assert_eq!(json["latitude"], "19.0414");
    }

    #[test]
    fn coordinates_parse_decimal_strings() {
        let city = City {
            id: 1,
            name: "Durango".to_string(),
            state: "Durango".to_string(),
            latitude: "24.0277".to_string(),
            longitude: "-104.6532".to_string(),
            device_count: 0,
        };
        let view = CityWithStatus::new(&city, 0, StatusCounts::default());
        assert_eq!(view.coordinates(), Some((24.0277, -104.6532)));

        let mut broken = view.clone();
        broken.latitude = "north".to_string();
        assert_eq!(broken.coordinates(), None);
    }
}
