use anyhow::{Context, Result};
use serde::Deserialize;

/// Complete devmap configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevmapConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow any origin (the dashboard UI is usually served from elsewhere)
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl ServerConfig {
    /// Address to bind, e.g. "0.0.0.0:5000"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Demo data seeding
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    #[serde(default = "default_min_devices")]
    pub min_devices_per_city: usize,
    #[serde(default = "default_max_devices")]
    pub max_devices_per_city: usize,
}

fn default_seed_enabled() -> bool {
    true
}

fn default_min_devices() -> usize {
    3
}

fn default_max_devices() -> usize {
    5
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            min_devices_per_city: default_min_devices(),
            max_devices_per_city: default_max_devices(),
        }
    }
}

impl DevmapConfig {
    /// Apply DEVMAP_* environment overrides on top of file/default values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DEVMAP_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("DEVMAP_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Some(v) = lookup("DEVMAP_SEED_ENABLED") {
            if let Ok(b) = v.parse::<bool>() {
                self.seed.enabled = b;
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<DevmapConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: DevmapConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path))?;
    Ok(config)
}
