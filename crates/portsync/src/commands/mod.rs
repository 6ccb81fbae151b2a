//! Command handlers.

pub mod alert;
pub mod config_cmd;
pub mod device;
pub mod dns;
pub mod update_ports;
