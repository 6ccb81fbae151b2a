// LibreNMS HTTP client
//
// Wraps `reqwest::Client` with `X-Auth-Token` auth, `/api/v0` URL
// construction, and `{ status, message }` envelope checking. Endpoint
// groups live in sibling files as inherent methods.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::librenms::models::{
    AddDeviceResponse, DeviceResponse, ErrorBody, IpAddressEntry, IpAddressesResponse, PortResponse,
    PortsResponse,
};
use crate::transport::{TransportConfig, auth_headers, join_path};

/// Responses that carry the LibreNMS `status` envelope.
pub(crate) trait Envelope {
    fn status(&self) -> &str;
    fn message(&self) -> Option<&str>;
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(impl Envelope for $ty {
            fn status(&self) -> &str {
                &self.status
            }
            fn message(&self) -> Option<&str> {
                self.message.as_deref()
            }
        })*
    };
}

impl_envelope!(
    PortsResponse,
    PortResponse,
    DeviceResponse,
    IpAddressesResponse,
    AddDeviceResponse,
);

/// HTTP client for the LibreNMS v0 API.
///
/// Owns a lazily loaded copy of the IP address table. The cache is filled
/// on first use and shared by every subsequent IP lookup on this client.
pub struct LibreNmsClient {
    http: reqwest::Client,
    base_url: Url,
    pub(crate) ip_cache: Mutex<Option<Arc<Vec<IpAddressEntry>>>>,
}

impl LibreNmsClient {
    /// Create a client authenticating with `X-Auth-Token`.
    ///
    /// `base_url` is the LibreNMS root; `/api/v0` is appended per request.
    pub fn new(base_url: Url, token: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let headers = auth_headers("x-auth-token", token.expose_secret())?;
        let http = transport.build_client(headers)?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            ip_cache: Mutex::new(None),
        }
    }

    /// The LibreNMS base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/v0/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        join_path(&self.base_url, &format!("api/v0/{path}"))
    }

    /// Send a GET request and check the `status` envelope.
    pub(crate) async fn get<T: DeserializeOwned + Envelope>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_response(resp).await
    }

    /// Send a JSON POST request and check the `status` envelope.
    pub(crate) async fn post<T: DeserializeOwned + Envelope>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_response(resp).await
    }

    async fn parse_response<T: DeserializeOwned + Envelope>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: error_message(&body)
                    .unwrap_or_else(|| "LibreNMS rejected the API token".into()),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { resource: path });
        }
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }

        let parsed: T = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

        if parsed.status() != "ok" {
            return Err(Error::Api {
                status: status.as_u16(),
                message: parsed
                    .message()
                    .map_or_else(|| format!("status={}", parsed.status()), str::to_owned),
            });
        }
        Ok(parsed)
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message)
}
