// LibreNMS device and IP address endpoints
//
// Device lookup by id and registration, plus the IP-to-device resolution
// path that goes through the cached IP address table.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::Error;
use crate::librenms::client::LibreNmsClient;
use crate::librenms::models::{
    AddDeviceRequest, AddDeviceResponse, DeviceResponse, IpAddressEntry, IpAddressesResponse,
    LibreDevice, LibrePort,
};

impl LibreNmsClient {
    /// Get a device by id.
    ///
    /// `GET /api/v0/devices/{id}`
    pub async fn get_device(&self, device_id: i64) -> Result<LibreDevice, Error> {
        let url = self.api_url(&format!("devices/{device_id}"))?;
        let resp: DeviceResponse = self.get(url).await?;

        let count = resp
            .count
            .unwrap_or_else(|| u64::try_from(resp.devices.len()).unwrap_or(u64::MAX));
        if count > 1 || resp.devices.len() > 1 {
            error!(device_id, count, "too many devices found");
            return Err(Error::Ambiguous {
                what: "devices",
                id: device_id,
            });
        }
        resp.devices.into_iter().next().ok_or_else(|| Error::NotFound {
            resource: format!("device {device_id}"),
        })
    }

    /// Start monitoring `hostname` (a name or IP), returning the new device id.
    ///
    /// `POST /api/v0/devices`
    pub async fn add_device(&self, hostname: &str) -> Result<i64, Error> {
        let url = self.api_url("devices")?;
        let body = AddDeviceRequest {
            hostname: hostname.to_owned(),
            ping_fallback: true,
        };
        let resp: AddDeviceResponse = self.post(url, &body).await?;
        if let Some(message) = resp.message.as_deref() {
            info!(hostname, message, "LibreNMS accepted device");
        }
        resp.devices
            .first()
            .map(|device| device.device_id)
            .ok_or_else(|| Error::Api {
                status: 200,
                message: format!("LibreNMS returned no device id for {hostname}"),
            })
    }

    /// Fetch the full IP address table (uncached).
    ///
    /// `GET /api/v0/resources/ip/addresses`
    pub async fn list_ip_addresses(&self) -> Result<Vec<IpAddressEntry>, Error> {
        let url = self.api_url("resources/ip/addresses")?;
        let resp: IpAddressesResponse = self.get(url).await?;
        Ok(resp.ip_addresses)
    }

    /// Return the cached IP address table, loading it on first use.
    ///
    /// The lock is held across the fetch so concurrent callers trigger a
    /// single request. A failed load leaves the cache empty.
    pub async fn load_ips(&self) -> Result<Arc<Vec<IpAddressEntry>>, Error> {
        let mut cache = self.ip_cache.lock().await;
        if let Some(ips) = cache.as_ref() {
            return Ok(Arc::clone(ips));
        }
        let ips = Arc::new(self.list_ip_addresses().await.inspect_err(|e| {
            error!(error = %e, "could not load IP address table");
        })?);
        debug!(count = ips.len(), "cached IP address table");
        *cache = Some(Arc::clone(&ips));
        Ok(ips)
    }

    /// Find the port an IPv4 address is configured on.
    ///
    /// Fails with [`Error::NotFound`] if no port carries the address.
    pub async fn find_port_for_ip(&self, ip: &str) -> Result<LibrePort, Error> {
        let ips = self.load_ips().await?;
        let entry = ips
            .iter()
            .find(|entry| entry.ipv4_address.as_deref() == Some(ip))
            .ok_or_else(|| Error::NotFound {
                resource: format!("port for IP {ip}"),
            })?;
        self.get_port(entry.port_id).await
    }

    /// Resolve the device that owns an IPv4 address.
    pub async fn get_device_by_ip(&self, ip: &str) -> Result<LibreDevice, Error> {
        let port = self.find_port_for_ip(ip).await?;
        self.get_device(port.device_id).await
    }
}
