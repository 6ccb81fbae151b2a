// portsync-api: Async Rust clients for the NetBox and LibreNMS REST APIs

pub mod error;
pub mod librenms;
pub mod netbox;
pub mod transport;

pub use error::Error;
pub use librenms::LibreNmsClient;
pub use netbox::NetboxClient;
pub use transport::{TlsMode, TransportConfig};
