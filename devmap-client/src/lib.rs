//! Dashboard client for the devmap API.
//!
//! Holds the city/device-type/device-status filter model and a dashboard
//! session that applies it to data fetched over HTTP.

pub mod client;
pub mod dashboard;
pub mod filter;
pub mod format;

pub use client::ApiClient;
pub use dashboard::Dashboard;
pub use filter::FilterState;
