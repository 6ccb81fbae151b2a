// LibreNMS API client modules
//
// Covers the v0 endpoints needed to read discovered ports and to resolve
// devices by id or IP address.

pub mod client;
pub mod devices;
pub mod models;
pub mod ports;

pub use client::LibreNmsClient;
