// NetBox API client modules
//
// Covers DCIM interfaces, devices and virtual machines, IPAM addresses,
// and journal entries. All list responses use the `{ count, next, results }`
// envelope.

pub mod client;
pub mod devices;
pub mod interfaces;
pub mod ipam;
pub mod journal;
pub mod models;

pub use client::NetboxClient;
