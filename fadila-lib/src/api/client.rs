//! Students-organization client

use std::sync::Arc;
use std::time::Duration;

use fadila_ui::Record;
use reqwest::Client;
use url::Url;

use super::ApiEnvelope;
use crate::error::ApiError;

/// Path of the organization endpoint, relative to the base URL.
pub const ORGANIZATION_PATH: &str = "api/students/organization";

/// Fetches the students organization (classes, groups, counts) as raw records.
///
/// One request per call. Failures are returned to the caller, which decides
/// whether to offer a retry.
///
/// # Example
///
/// ```ignore
/// let client = OrganizationClient::builder()
///     .base_url("http://localhost:3000")?
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let records = client.fetch_organization().await?;
/// ```
#[derive(Clone)]
pub struct OrganizationClient {
    inner: Arc<OrganizationClientInner>,
}

struct OrganizationClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for OrganizationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrganizationClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl OrganizationClient {
    /// Creates a new builder.
    pub fn builder() -> OrganizationClientBuilder {
        OrganizationClientBuilder::default()
    }

    /// Creates a client with default settings.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url)?.build()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Full URL of the organization endpoint.
    pub fn organization_url(&self) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(ORGANIZATION_PATH)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// `GET {base}/api/students/organization`.
    pub async fn fetch_organization(&self) -> Result<Vec<Record>, ApiError> {
        let url = self.organization_url()?;
        log::debug!("GET {url}");

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::warn!("organization fetch failed with HTTP {}", status.as_u16());
            return Err(ApiError::http(status.as_u16(), body));
        }

        let records = ApiEnvelope::<Vec<Record>>::from_body(&body)?.into_result()?;
        log::debug!("organization fetch returned {} records", records.len());
        Ok(records)
    }
}

/// Builder for [`OrganizationClient`].
#[derive(Debug, Default)]
pub struct OrganizationClientBuilder {
    base_url: Option<Url>,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl OrganizationClientBuilder {
    /// Sets the base URL. A trailing slash is added so relative joins keep the path.
    pub fn base_url(mut self, url: &str) -> Result<Self, ApiError> {
        let normalized = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        };
        let parsed = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses an existing HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<OrganizationClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::InvalidUrl("base URL not set".to_string()))?;
        Ok(OrganizationClient {
            inner: Arc::new(OrganizationClientInner {
                base_url,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_base_path() {
        let client = OrganizationClient::new("http://school.local/v1").unwrap();
        assert_eq!(
            client.organization_url().unwrap().as_str(),
            "http://school.local/v1/api/students/organization"
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            OrganizationClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            OrganizationClient::new("ftp://school.local"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_build_requires_base_url() {
        assert!(matches!(
            OrganizationClient::builder().build(),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
