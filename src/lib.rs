// City, device and user records
pub mod model;

// In-memory record store and aggregation views
pub mod storage;

// Demo dataset
pub mod seed;

// Configuration loading
pub mod config;

// HTTP API
pub mod api;
