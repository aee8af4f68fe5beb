use crate::{CatalogItem, Error, Result};
use std::time::Duration;

pub struct HttpRegistryClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRegistryClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch the full catalog from `{base}/index.json`
    pub fn get_index(&self) -> Result<Vec<CatalogItem>> {
        let url = format!("{}/index.json", self.base_url);
        tracing::debug!("fetching catalog index from {}", url);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                Error::CatalogUnavailable(format!(
                    "cannot connect to registry at {}\n\
                        Please check that the registry is reachable and the URL is correct.",
                    self.base_url
                ))
            } else if e.is_timeout() {
                Error::CatalogUnavailable(
                    "registry request timed out. Please try again.".to_string(),
                )
            } else {
                Error::CatalogUnavailable(format!("failed to fetch catalog index: {}", e))
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_msg = match status.as_u16() {
                500 | 502 | 503 | 504 => format!(
                    "registry server error (HTTP {}).\n\
                    The registry is experiencing issues. Please try again later.",
                    status.as_u16()
                ),
                _ => format!("registry error: HTTP {}", status.as_u16()),
            };
            return Err(Error::CatalogUnavailable(error_msg));
        }

        let body = response.text().map_err(|e| {
            Error::CatalogUnavailable(format!("failed to read registry response: {}", e))
        })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&body)
            .map_err(|e| Error::CatalogInvalid(format!("catalog index: {}", e)))?;

        for item in &items {
            item.validate()?;
        }

        Ok(items)
    }

    /// Fetch one component from `{base}/components/{name}.json`
    pub fn get_item(&self, name: &str) -> Result<CatalogItem> {
        let url = format!(
            "{}/components/{}.json",
            self.base_url,
            urlencoding::encode(name)
        );
        tracing::debug!("fetching component '{}' from {}", name, url);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() {
                Error::CatalogUnavailable(format!(
                    "cannot connect to registry at {}\n\
                        Please check that the registry is reachable and the URL is correct.",
                    self.base_url
                ))
            } else if e.is_timeout() {
                Error::CatalogUnavailable(
                    "registry request timed out. Please try again.".to_string(),
                )
            } else {
                Error::CatalogUnavailable(format!("failed to fetch component: {}", e))
            }
        })?;

        let status = response.status();

        if status == 404 {
            return Err(Error::ItemNotFound(format!(
                "'{}' is not in the registry",
                name
            )));
        }

        if !status.is_success() {
            let error_msg = match status.as_u16() {
                500 | 502 | 503 | 504 => format!(
                    "registry server error (HTTP {}).\n\
                    The registry is experiencing issues. Please try again later.",
                    status.as_u16()
                ),
                _ => format!("registry error: HTTP {}", status.as_u16()),
            };
            return Err(Error::CatalogUnavailable(error_msg));
        }

        let body = response.text().map_err(|e| {
            Error::CatalogUnavailable(format!("failed to read registry response: {}", e))
        })?;

        let item: CatalogItem = serde_json::from_str(&body)
            .map_err(|e| Error::CatalogInvalid(format!("component '{}': {}", name, e)))?;

        item.validate()?;

        Ok(item)
    }
}
