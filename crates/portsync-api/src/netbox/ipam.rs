// NetBox IPAM endpoints

use tracing::debug;

use crate::error::Error;
use crate::netbox::client::NetboxClient;
use crate::netbox::models::{IpAddressWrite, NetboxIpAddress};

impl NetboxClient {
    /// Every IP address record matching `address` (with or without prefix length).
    ///
    /// `GET /api/ipam/ip-addresses/?address={ip}`
    pub async fn search_ip(&self, address: &str) -> Result<Vec<NetboxIpAddress>, Error> {
        let found: Vec<NetboxIpAddress> = self
            .list_all("ipam/ip-addresses/", &[("address", address.to_owned())])
            .await?;
        debug!(address, count = found.len(), "searched IP addresses");
        Ok(found)
    }

    /// Set the DNS name of an IP address record.
    ///
    /// `PATCH /api/ipam/ip-addresses/{id}/`
    pub async fn set_ip_dns_name(&self, ip_id: i64, dns_name: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("ipam/ip-addresses/{ip_id}/"))?;
        debug!(ip_id, dns_name, "setting dns_name");
        let body = IpAddressWrite {
            dns_name: dns_name.to_owned(),
        };
        let _: serde_json::Value = self.patch(url, &body).await?;
        Ok(())
    }
}
