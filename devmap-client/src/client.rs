use anyhow::{anyhow, Context, Result};
use devmap::model::{CityWithStatus, Device, DeviceStatus, DeviceWithCity};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Error body returned by the devmap API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct StatusUpdateBody<'a> {
    status: &'a str,
}

/// HTTP client for the devmap REST API.
///
/// Lookups by id return `Ok(None)` on 404 so callers can tell "unknown"
/// apart from "known but empty".
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g. "http://localhost:5000").
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("devmap-client/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/cities
    pub async fn list_cities(&self) -> Result<Vec<CityWithStatus>> {
        self.get_required("/api/cities").await
    }

    /// GET /api/cities/:id
    pub async fn get_city(&self, id: i64) -> Result<Option<CityWithStatus>> {
        self.get_optional(&format!("/api/cities/{}", id)).await
    }

    /// GET /api/devices
    pub async fn list_devices(&self) -> Result<Vec<DeviceWithCity>> {
        self.get_required("/api/devices").await
    }

    /// GET /api/cities/:id/devices. `Ok(None)` means the city is unknown.
    pub async fn city_devices(&self, city_id: i64) -> Result<Option<Vec<DeviceWithCity>>> {
        self.get_optional(&format!("/api/cities/{}/devices", city_id))
            .await
    }

    /// GET /api/devices/:id
    pub async fn get_device(&self, id: i64) -> Result<Option<DeviceWithCity>> {
        self.get_optional(&format!("/api/devices/{}", id)).await
    }

    /// PATCH /api/devices/:id/status
    pub async fn update_device_status(
        &self,
        id: i64,
        status: DeviceStatus,
    ) -> Result<Option<Device>> {
        let url = format!("{}/api/devices/{}/status", self.base_url, id);
        let response = self
            .http_client
            .patch(&url)
            .json(&StatusUpdateBody {
                status: status.as_str(),
            })
            .send()
            .await
            .context("Failed to send update_device_status request")?;

        read_optional(response, &url).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        read_optional(response, &url).await
    }

    async fn get_required<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_optional(path)
            .await?
            .ok_or_else(|| anyhow!("devmap API returned 404 for {}", path))
    }
}

/// 2xx → parsed body, 404 → None, anything else → error carrying the server message.
async fn read_optional<T: DeserializeOwned>(response: Response, url: &str) -> Result<Option<T>> {
    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        s if s.is_success() => response
            .json::<T>()
            .await
            .map(Some)
            .with_context(|| format!("Failed to parse response from {}", url)),
        s => {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| "no error message".to_string());
            Err(anyhow!("devmap API error {}: {}", s, message))
        }
    }
}
