// NetBox HTTP client
//
// Wraps `reqwest::Client` with token auth, URL construction under `/api/`,
// and uniform status handling. Endpoint groups (interfaces, devices, ipam,
// journal) are inherent methods in sibling files.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::netbox::models::{ErrorBody, Page};
use crate::transport::{TransportConfig, auth_headers, join_path};

/// Page size requested from list endpoints. The server may cap it lower.
const PAGE_LIMIT: u32 = 1000;

/// HTTP client for the NetBox REST API.
pub struct NetboxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NetboxClient {
    /// Create a client authenticating with `Authorization: Token <token>`.
    ///
    /// `base_url` is the NetBox root (e.g. `https://netbox.example.net`),
    /// without the `/api` suffix.
    pub fn new(base_url: Url, token: &SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let headers = auth_headers(
            "authorization",
            &format!("Token {}", token.expose_secret()),
        )?;
        let http = transport.build_client(headers)?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The NetBox base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        join_path(&self.base_url, &format!("api/{path}"))
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        Self::parse_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self.http.patch(url).json(body).send().await?;
        Self::parse_response(resp).await
    }

    /// GET every page of a list endpoint, following `next` links.
    pub(crate) async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut url = self.api_url(path)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in filters {
                query.append_pair(key, value);
            }
            query.append_pair("limit", &PAGE_LIMIT.to_string());
        }

        let mut items = Vec::new();
        let mut next = Some(url);
        while let Some(page_url) = next.take() {
            let page: Page<T> = self.get(page_url).await?;
            debug!(path, count = page.count, received = page.results.len(), "fetched page");
            items.extend(page.results);
            next = page.next.as_deref().map(Url::parse).transpose()?;
        }
        Ok(items)
    }

    /// Map the HTTP status to an `Error`, or deserialize the body on success.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: detail_or(&body, "NetBox rejected the API token"),
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound { resource: path });
        }
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: detail_or(&body, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Extract NetBox's `detail` message, falling back to `fallback`.
fn detail_or(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| fallback.to_owned())
}
