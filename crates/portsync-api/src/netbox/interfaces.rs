// NetBox interface endpoints
//
// `dcim/interfaces/` list (paginated via `next`), create, and partial update.

use tracing::debug;

use crate::error::Error;
use crate::netbox::client::NetboxClient;
use crate::netbox::models::{InterfaceWrite, NetboxInterface};

impl NetboxClient {
    /// List every interface on a device, following pagination.
    ///
    /// `GET /api/dcim/interfaces/?device_id={id}&limit=1000`
    pub async fn list_interfaces(&self, device_id: i64) -> Result<Vec<NetboxInterface>, Error> {
        let interfaces: Vec<NetboxInterface> = self
            .list_all("dcim/interfaces/", &[("device_id", device_id.to_string())])
            .await?;
        debug!(device_id, count = interfaces.len(), "listed interfaces");
        Ok(interfaces)
    }

    /// Create an interface.
    ///
    /// `POST /api/dcim/interfaces/`
    pub async fn create_interface(&self, body: &InterfaceWrite) -> Result<NetboxInterface, Error> {
        let url = self.api_url("dcim/interfaces/")?;
        debug!(name = ?body.name, "creating interface");
        self.post(url, body).await
    }

    /// Partially update an interface; only populated fields are sent.
    ///
    /// `PATCH /api/dcim/interfaces/{id}/`
    pub async fn update_interface(
        &self,
        interface_id: i64,
        body: &InterfaceWrite,
    ) -> Result<NetboxInterface, Error> {
        let url = self.api_url(&format!("dcim/interfaces/{interface_id}/"))?;
        debug!(interface_id, "updating interface");
        self.patch(url, body).await
    }
}
