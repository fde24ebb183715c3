use super::Storage;
use crate::model::{
    City, CityWithStatus, Device, DeviceWithCity, NewCity, NewDevice, NewUser, StatusCounts,
    User,
};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// In-memory store. Nothing survives a restart.
pub struct MemStorage {
    users: DashMap<i64, User>,
    cities: DashMap<i64, City>,
    devices: DashMap<i64, Device>,

    /// Next ids to hand out; start at 1 and only ever increase
    next_user_id: AtomicI64,
    next_city_id: AtomicI64,
    next_device_id: AtomicI64,
}

impl MemStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            cities: DashMap::new(),
            devices: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_city_id: AtomicI64::new(1),
            next_device_id: AtomicI64::new(1),
        }
    }

    /// Number of stored devices
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Live status view of one city: a full scan over devices.
    fn status_view(&self, city: &City) -> CityWithStatus {
        let statuses: Vec<String> = self
            .devices
            .iter()
            .filter(|d| d.city_id == city.id)
            .map(|d| d.status.clone())
            .collect();
        let counts = StatusCounts::tally(statuses.iter().map(String::as_str));
        CityWithStatus::new(city, statuses.len(), counts)
    }

    fn enrich(&self, device: &Device) -> DeviceWithCity {
        let city_name = self.cities.get(&device.city_id).map(|c| c.name.clone());
        DeviceWithCity::new(device, city_name.as_deref())
    }

    fn sorted_devices(&self) -> Vec<Device> {
        let mut devices: Vec<Device> = self.devices.iter().map(|d| d.value().clone()).collect();
        devices.sort_by_key(|d| d.id);
        devices
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemStorage {
    fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).map(|u| u.clone())
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone())
    }

    fn create_user(&self, user: NewUser) -> User {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            username: user.username,
            password: user.password,
        };
        self.users.insert(id, user.clone());
        debug!(user_id = id, username = %user.username, "User created");
        user
    }

    fn list_cities(&self) -> Vec<CityWithStatus> {
        let mut cities: Vec<City> = self.cities.iter().map(|c| c.value().clone()).collect();
        cities.sort_by_key(|c| c.id);
        cities.iter().map(|city| self.status_view(city)).collect()
    }

    fn get_city(&self, id: i64) -> Option<CityWithStatus> {
        let city = self.cities.get(&id)?.value().clone();
        Some(self.status_view(&city))
    }

    fn create_city(&self, city: NewCity) -> City {
        let id = self.next_city_id.fetch_add(1, Ordering::SeqCst);
        let city = City {
            id,
            name: city.name,
            state: city.state,
            latitude: city.latitude,
            longitude: city.longitude,
            device_count: city.device_count,
        };
        self.cities.insert(id, city.clone());
        debug!(city_id = id, name = %city.name, "City created");
        city
    }

    fn list_devices(&self) -> Vec<DeviceWithCity> {
        self.sorted_devices()
            .iter()
            .map(|device| self.enrich(device))
            .collect()
    }

    fn list_devices_for_city(&self, city_id: i64) -> Option<Vec<DeviceWithCity>> {
        let city_name = self.cities.get(&city_id)?.name.clone();
        let devices = self
            .sorted_devices()
            .iter()
            .filter(|d| d.city_id == city_id)
            .map(|d| DeviceWithCity::new(d, Some(city_name.as_str())))
            .collect();
        Some(devices)
    }

    fn get_device(&self, id: i64) -> Option<DeviceWithCity> {
        let device = self.devices.get(&id)?.value().clone();
        Some(self.enrich(&device))
    }

    fn create_device(&self, device: NewDevice) -> Device {
        let id = self.next_device_id.fetch_add(1, Ordering::SeqCst);
        let device = Device {
            id,
            name: device.name,
            device_id: device.device_id,
            device_type: device.device_type,
            status: device.status,
            city_id: device.city_id,
            last_updated: device.last_updated.unwrap_or_else(Utc::now),
            metadata: device.metadata,
        };
        if !self.cities.contains_key(&device.city_id) {
            debug!(device_id = id, city_id = device.city_id, "Device references unknown city");
        }
        self.devices.insert(id, device.clone());
        debug!(device_id = id, code = %device.device_id, "Device created");
        device
    }

    fn update_device_status(&self, id: i64, status: &str) -> Option<Device> {
        let mut device = self.devices.get_mut(&id)?;

        // Never move the timestamp backwards, even if the wall clock does
        let now = Utc::now().max(device.last_updated);
        device.status = status.to_string();
        device.last_updated = now;

        debug!(device_id = id, status = %status, "Device status updated");
        Some(device.value().clone())
    }
}
