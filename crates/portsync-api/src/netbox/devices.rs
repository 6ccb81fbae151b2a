// NetBox device and virtual machine endpoints
//
// Both models are addressed through `ObjectType` so callers holding a
// `(type, id)` pair never need to know which API group it lives in.

use serde::Serialize;
use tracing::{debug, error};

use crate::error::Error;
use crate::netbox::client::NetboxClient;
use crate::netbox::models::{NetboxDevice, ObjectType};

/// Object types that can carry a `monitoring_id`, in lookup order.
const MONITORED_TYPES: [ObjectType; 2] = [ObjectType::Device, ObjectType::VirtualMachine];

impl NetboxClient {
    /// Get a device or virtual machine by id.
    ///
    /// `GET /api/{group}/{id}/`
    pub async fn get_object(&self, object_type: ObjectType, id: i64) -> Result<NetboxDevice, Error> {
        let url = self.api_url(&format!("{}{id}/", object_type.api_path()))?;
        self.get(url).await
    }

    /// Partially update any object; only the fields in `body` are sent.
    ///
    /// `PATCH /api/{group}/{id}/`
    pub async fn update_object(
        &self,
        object_type: ObjectType,
        id: i64,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("{}{id}/", object_type.api_path()))?;
        debug!(object_type = object_type.as_str(), id, "updating object");
        let _: serde_json::Value = self.patch(url, body).await?;
        Ok(())
    }

    /// List devices matching NetBox filter parameters, following pagination.
    pub async fn list_devices(&self, filters: &[(&str, String)]) -> Result<Vec<NetboxDevice>, Error> {
        self.list_all(ObjectType::Device.api_path(), filters).await
    }

    /// List virtual machines matching NetBox filter parameters.
    pub async fn list_virtual_machines(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Vec<NetboxDevice>, Error> {
        self.list_all(ObjectType::VirtualMachine.api_path(), filters).await
    }

    /// Find the one device or VM whose `monitoring_id` custom field is `monitoring_id`.
    ///
    /// Devices are searched before virtual machines. Fails with
    /// [`Error::NotFound`] when neither has it and [`Error::Ambiguous`] when
    /// more than one object does.
    pub async fn find_monitored_object(&self, monitoring_id: i64) -> Result<(ObjectType, i64), Error> {
        let filter = [("cf_monitoring_id", monitoring_id.to_string())];
        let mut found = Vec::new();
        for object_type in MONITORED_TYPES {
            let objects: Vec<NetboxDevice> = self.list_all(object_type.api_path(), &filter).await?;
            found.extend(objects.into_iter().map(|o| (object_type, o.id)));
        }

        match found.as_slice() {
            [single] => Ok(*single),
            [] => Err(Error::NotFound {
                resource: format!("object with monitoring_id {monitoring_id}"),
            }),
            _ => {
                error!(monitoring_id, count = found.len(), "monitoring_id is not unique");
                Err(Error::Ambiguous {
                    what: "objects with this monitoring_id",
                    id: monitoring_id,
                })
            }
        }
    }
}
