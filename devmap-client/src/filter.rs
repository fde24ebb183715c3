use devmap::model::{CityWithStatus, DeviceStatus, DeviceType, DeviceWithCity};
use std::collections::HashMap;
use tracing::info;

/// Three independent membership sets deciding what the dashboard shows.
///
/// The city set starts empty ("show nothing") and is back-filled to all
/// cities exactly once, the first time a city list is offered through
/// [`FilterState::initialize_cities`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    cities: HashMap<i64, bool>,
    device_types: HashMap<DeviceType, bool>,
    device_statuses: HashMap<DeviceStatus, bool>,
    cities_initialized: bool,
}

fn default_device_types() -> HashMap<DeviceType, bool> {
    DeviceType::ALL.into_iter().map(|t| (t, true)).collect()
}

fn default_device_statuses() -> HashMap<DeviceStatus, bool> {
    HashMap::from([
        (DeviceStatus::Online, true),
        (DeviceStatus::Warning, true),
        (DeviceStatus::Offline, false),
    ])
}

fn all_cities(cities: &[CityWithStatus]) -> HashMap<i64, bool> {
    cities.iter().map(|c| (c.id, true)).collect()
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            cities: HashMap::new(),
            device_types: default_device_types(),
            device_statuses: default_device_statuses(),
            cities_initialized: false,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every city in `cities`, but only on the first call.
    ///
    /// Returns true if the city set was populated by this call. Later calls
    /// leave the set alone even when the list has changed. The first call
    /// replaces the whole set, so city choices made before it are discarded.
    pub fn initialize_cities(&mut self, cities: &[CityWithStatus]) -> bool {
        if self.cities_initialized {
            return false;
        }
        self.cities = all_cities(cities);
        self.cities_initialized = true;
        true
    }

    pub fn cities_initialized(&self) -> bool {
        self.cities_initialized
    }

    pub fn set_city(&mut self, city_id: i64, selected: bool) {
        self.cities.insert(city_id, selected);
    }

    /// Flip one city's membership; returns the new value
    pub fn toggle_city(&mut self, city_id: i64) -> bool {
        let selected = !self.city_selected(city_id);
        self.set_city(city_id, selected);
        selected
    }

    pub fn set_device_type(&mut self, device_type: DeviceType, enabled: bool) {
        self.device_types.insert(device_type, enabled);
    }

    pub fn toggle_device_type(&mut self, device_type: DeviceType) -> bool {
        let enabled = !self.device_type_enabled(device_type);
        self.set_device_type(device_type, enabled);
        enabled
    }

    pub fn set_status(&mut self, status: DeviceStatus, enabled: bool) {
        self.device_statuses.insert(status, enabled);
    }

    pub fn toggle_status(&mut self, status: DeviceStatus) -> bool {
        let enabled = !self.status_enabled(status);
        self.set_status(status, enabled);
        enabled
    }

    /// Back to defaults: every loaded city selected, all types, online + warning.
    ///
    /// Does not count as the one-time city initialization.
    pub fn reset(&mut self, cities: &[CityWithStatus]) {
        self.cities = all_cities(cities);
        self.device_types = default_device_types();
        self.device_statuses = default_device_statuses();
    }

    /// Filtering is recomputed on every read; this only logs the current state.
    pub fn apply(&self) {
        let mut statuses: Vec<&str> = self
            .device_statuses
            .iter()
            .filter(|(_, on)| **on)
            .map(|(s, _)| s.as_str())
            .collect();
        statuses.sort_unstable();
        let mut types: Vec<&str> = self
            .device_types
            .iter()
            .filter(|(_, on)| **on)
            .map(|(t, _)| t.as_str())
            .collect();
        types.sort_unstable();
        let cities = self.cities.values().filter(|on| **on).count();

        info!(
            cities,
            types = ?types,
            statuses = ?statuses,
            "Filters applied"
        );
    }

    /// Missing cities count as not selected
    pub fn city_selected(&self, city_id: i64) -> bool {
        self.cities.get(&city_id).copied().unwrap_or(false)
    }

    pub fn device_type_enabled(&self, device_type: DeviceType) -> bool {
        self.device_types.get(&device_type).copied().unwrap_or(false)
    }

    pub fn status_enabled(&self, status: DeviceStatus) -> bool {
        self.device_statuses.get(&status).copied().unwrap_or(false)
    }

    pub fn matches_city(&self, city: &CityWithStatus) -> bool {
        self.city_selected(city.id)
    }

    /// City selected, type enabled and status enabled. A status outside the
    /// known three never matches.
    pub fn matches_device(&self, device: &DeviceWithCity) -> bool {
        self.city_selected(device.city_id)
            && self.device_type_enabled(device.device_type)
            && device
                .parsed_status()
                .is_some_and(|status| self.status_enabled(status))
    }

    pub fn visible_cities<'a>(&self, cities: &'a [CityWithStatus]) -> Vec<&'a CityWithStatus> {
        cities.iter().filter(|c| self.matches_city(c)).collect()
    }

    pub fn visible_devices<'a>(&self, devices: &'a [DeviceWithCity]) -> Vec<&'a DeviceWithCity> {
        devices.iter().filter(|d| self.matches_device(d)).collect()
    }
}
