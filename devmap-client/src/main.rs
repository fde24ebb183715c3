use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use devmap::model::{DeviceStatus, DeviceType};
use devmap_client::format::{device_icon, format_time_difference, status_text};
use devmap_client::{ApiClient, Dashboard};
use tracing::info;

#[derive(Parser)]
#[command(name = "devmap-client", about = "Terminal view of the devmap dashboard")]
struct Cli {
    /// Base URL of the devmap API
    #[arg(long, env = "DEVMAP_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the filtered city list, and optionally one city's devices
    Show {
        /// City whose devices to list
        #[arg(long)]
        city: Option<i64>,
        /// Also show offline devices
        #[arg(long)]
        include_offline: bool,
        /// Hide a device type (repeatable)
        #[arg(long = "exclude-type")]
        exclude_types: Vec<DeviceType>,
        /// Deselect a city (repeatable)
        #[arg(long = "exclude-city")]
        exclude_cities: Vec<i64>,
    },
    /// Change one device's status
    SetStatus {
        device: i64,
        status: DeviceStatus,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devmap_client=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;
    info!(api_url = %client.base_url(), "devmap client starting");

    let mut dashboard = Dashboard::new(client);
    dashboard.refresh_cities().await?;

    match cli.command.unwrap_or(Command::Show {
        city: None,
        include_offline: false,
        exclude_types: Vec::new(),
        exclude_cities: Vec::new(),
    }) {
        Command::Show {
            city,
            include_offline,
            exclude_types,
            exclude_cities,
        } => {
            let filters = dashboard.filters_mut();
            filters.set_status(DeviceStatus::Offline, include_offline);
            for t in exclude_types {
                filters.set_device_type(t, false);
            }
            for id in exclude_cities {
                filters.set_city(id, false);
            }
            filters.apply();

            print_cities(&dashboard);

            if let Some(city_id) = city {
                if !dashboard.select_city(city_id).await? {
                    bail!("City {} not found", city_id);
                }
                print_devices(&dashboard);
            }
        }
        Command::SetStatus { device, status } => {
            match dashboard.update_device_status(device, status).await? {
                Some(updated) => println!(
                    "{} ({}) is now {}",
                    updated.name,
                    updated.device_id,
                    status_text(&updated.status)
                ),
                None => bail!("Device {} not found", device),
            }
        }
    }

    Ok(())
}

fn print_cities(dashboard: &Dashboard) {
    let visible = dashboard.visible_cities();
    println!(
        "{} of {} cities visible",
        visible.len(),
        dashboard.cities().len()
    );
    for city in visible {
        println!(
            "  [{:>2}] {:<18} {:<12} total {:>2}  online {:>2}  warning {:>2}  offline {:>2}",
            city.id,
            city.name,
            city.state,
            city.device_count,
            city.online_count,
            city.warning_count,
            city.offline_count
        );
    }
}

fn print_devices(dashboard: &Dashboard) {
    let Some(city) = dashboard.selected_city() else {
        return;
    };
    let visible = dashboard.visible_devices();
    let counts = dashboard.visible_status_counts();
    let now = Utc::now();

    println!();
    println!(
        "{}: {} devices shown (online {}, warning {}, offline {})",
        city.name,
        visible.len(),
        counts.online,
        counts.warning,
        counts.offline
    );
    for device in visible {
        let age = device
            .last_updated_at()
            .map(|ts| format_time_difference(ts, now))
            .unwrap_or_else(|| "?".to_string());
        let detail = ["traffic", "value", "state"]
            .iter()
            .find_map(|key| device.metadata_value(key))
            .unwrap_or_default();
        println!(
            "  {:<10} {:<22} {:<12} {:<15} {:>11}  {}",
            device_icon(device.device_type, &device.status),
            device.name,
            device.device_id,
            status_text(&device.status),
            age,
            detail
        );
    }
}
