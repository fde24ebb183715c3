// Record store and read-time aggregation views

mod memory;

pub use memory::MemStorage;

use crate::model::{
    City, CityWithStatus, Device, DeviceWithCity, NewCity, NewDevice, NewUser, User,
};

/// Create/read/update contract over users, cities and devices.
///
/// Absence is reported as `None`, never as an error. City views carry device
/// counts recomputed from live device records on every call.
pub trait Storage: Send + Sync {
    fn get_user(&self, id: i64) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&self, user: NewUser) -> User;

    /// All cities with live status counts, in ascending id order
    fn list_cities(&self) -> Vec<CityWithStatus>;
    fn get_city(&self, id: i64) -> Option<CityWithStatus>;
    fn create_city(&self, city: NewCity) -> City;

    /// All devices enriched with their city name
    fn list_devices(&self) -> Vec<DeviceWithCity>;
    /// Devices of one city. `Some(vec![])` for a known city without devices,
    /// `None` when the city itself is unknown.
    fn list_devices_for_city(&self, city_id: i64) -> Option<Vec<DeviceWithCity>>;
    fn get_device(&self, id: i64) -> Option<DeviceWithCity>;
    /// Store a device. The city reference is not checked; an orphan shows up
    /// as "Unknown City" when read back.
    fn create_device(&self, device: NewDevice) -> Device;
    /// Set a device's status and refresh its timestamp. The status text is
    /// stored as given; callers validate it.
    fn update_device_status(&self, id: i64, status: &str) -> Option<Device>;
}

#[cfg(test)]
mod tests;
