use crate::client::ApiClient;
use crate::filter::FilterState;
use anyhow::Result;
use devmap::model::{CityWithStatus, Device, DeviceStatus, DeviceWithCity, StatusCounts};
use tracing::{debug, info, warn};

/// One dashboard session: the loaded city list, the selected city's devices
/// and the filters applied to both.
///
/// Visible subsets are recomputed from the filters on every call.
pub struct Dashboard {
    client: ApiClient,
    cities: Vec<CityWithStatus>,
    selected_city: Option<i64>,
    devices: Vec<DeviceWithCity>,
    filters: FilterState,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cities: Vec::new(),
            selected_city: None,
            devices: Vec::new(),
            filters: FilterState::new(),
        }
    }

    /// Fetch the city list. The first successful load selects every city in
    /// the city filter; later loads leave the filter alone.
    pub async fn refresh_cities(&mut self) -> Result<usize> {
        self.cities = self.client.list_cities().await?;
        if self.filters.initialize_cities(&self.cities) {
            debug!(count = self.cities.len(), "City filter initialized");
        }
        info!(count = self.cities.len(), "Cities loaded");
        Ok(self.cities.len())
    }

    /// Select a city and fetch its devices, replacing whatever was shown.
    ///
    /// Returns false (and shows no devices) when the API does not know the city.
    /// A failed fetch leaves the previous selection and its devices untouched.
    pub async fn select_city(&mut self, city_id: i64) -> Result<bool> {
        let fetched = self.client.city_devices(city_id).await?;
        self.selected_city = Some(city_id);
        match fetched {
            Some(devices) => {
                debug!(city_id, count = devices.len(), "City devices loaded");
                self.devices = devices;
                Ok(true)
            }
            None => {
                warn!(city_id, "Selected city not found");
                self.devices.clear();
                Ok(false)
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_city = None;
        self.devices.clear();
    }

    /// Change a device's status, then reload cities and the selected city's devices.
    ///
    /// Once the server accepts the change the updated device is returned even if
    /// the reload fails; the stale views are kept and the failure is logged.
    pub async fn update_device_status(
        &mut self,
        device_id: i64,
        status: DeviceStatus,
    ) -> Result<Option<Device>> {
        let Some(device) = self.client.update_device_status(device_id, status).await? else {
            return Ok(None);
        };
        if let Err(e) = self.reload().await {
            warn!(device_id, error = %e, "Status updated but dashboard reload failed");
        }
        Ok(Some(device))
    }

    async fn reload(&mut self) -> Result<()> {
        self.refresh_cities().await?;
        if let Some(city_id) = self.selected_city {
            self.select_city(city_id).await?;
        }
        Ok(())
    }

    pub fn cities(&self) -> &[CityWithStatus] {
        &self.cities
    }

    pub fn devices(&self) -> &[DeviceWithCity] {
        &self.devices
    }

    pub fn selected_city(&self) -> Option<&CityWithStatus> {
        let id = self.selected_city?;
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Reset filters to defaults for the currently loaded cities
    pub fn reset_filters(&mut self) {
        self.filters.reset(&self.cities);
    }

    /// Cities that get a map marker
    pub fn visible_cities(&self) -> Vec<&CityWithStatus> {
        self.filters.visible_cities(&self.cities)
    }

    /// Devices shown in the selected city's info panel
    pub fn visible_devices(&self) -> Vec<&DeviceWithCity> {
        self.filters.visible_devices(&self.devices)
    }

    /// Status tally over the visible devices only
    pub fn visible_status_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.visible_devices().iter().map(|d| d.status.as_str()))
    }
}
