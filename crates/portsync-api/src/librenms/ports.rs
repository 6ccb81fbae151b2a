// LibreNMS port endpoints
//
// Per-device port listing (the input to interface sync) and single-port
// lookup by id.

use tracing::debug;

use crate::error::Error;
use crate::librenms::client::LibreNmsClient;
use crate::librenms::models::{LibrePort, PORT_COLUMNS, PortResponse, PortsResponse};

impl LibreNmsClient {
    /// List every port discovered on a device, in LibreNMS order.
    ///
    /// `GET /api/v0/devices/{id}/ports?columns=...`
    ///
    /// Fails with [`Error::NotFound`] when the device has no ports.
    pub async fn list_ports(&self, device_id: i64) -> Result<Vec<LibrePort>, Error> {
        let mut url = self.api_url(&format!("devices/{device_id}/ports"))?;
        url.query_pairs_mut().append_pair("columns", PORT_COLUMNS);

        let resp: PortsResponse = self.get(url).await?;
        debug!(device_id, count = resp.ports.len(), "listed ports");
        if resp.ports.is_empty() {
            return Err(Error::NotFound {
                resource: format!("ports for device {device_id}"),
            });
        }
        Ok(resp.ports)
    }

    /// Get a single port by id.
    ///
    /// `GET /api/v0/ports/{id}`
    pub async fn get_port(&self, port_id: i64) -> Result<LibrePort, Error> {
        let url = self.api_url(&format!("ports/{port_id}"))?;
        let resp: PortResponse = self.get(url).await?;
        let mut ports = resp.port.into_iter();
        match (ports.next(), ports.next()) {
            (Some(port), None) => Ok(port),
            (None, _) => Err(Error::NotFound {
                resource: format!("port {port_id}"),
            }),
            (Some(_), Some(_)) => Err(Error::Ambiguous {
                what: "ports",
                id: port_id,
            }),
        }
    }
}
