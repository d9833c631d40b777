//! HTTP client for the storefront's paginated listing pages.

use std::time::Duration;

use henko_core::CatalogConfig;
use reqwest::Client;

use crate::error::ScraperError;

/// Client for the catalog's listing endpoint.
///
/// Wraps a [`reqwest::Client`] with the configured timeout and User-Agent.
/// Use [`ListingClient::new`] for the real storefront or
/// [`ListingClient::with_base_url`] to point at a mock server in tests.
pub struct ListingClient {
    client: Client,
    base_url: String,
    products_path: String,
}

impl ListingClient {
    /// Creates a client pointed at the configured storefront.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] for an
    /// unparseable base URL.
    pub fn new(catalog: &CatalogConfig) -> Result<Self, ScraperError> {
        Self::with_base_url(catalog, &catalog.base_url)
    }

    /// Creates a client with an explicit base URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ListingClient::new`].
    pub fn with_base_url(catalog: &CatalogConfig, base_url: &str) -> Result<Self, ScraperError> {
        reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(catalog.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(catalog.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            products_path: catalog.products_path.clone(),
        })
    }

    /// Builds the listing URL for a 1-based page index. The page-number
    /// query parameter is appended only past the first page.
    #[must_use]
    pub fn listing_url(&self, page: u32) -> String {
        let base = format!("{}{}", self.base_url, self.products_path);
        if page > 1 {
            format!("{base}?mpage={page}")
        } else {
            base
        }
    }

    /// Fetches one listing page and returns its HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network/TLS failure.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx response.
    pub async fn fetch_listing_page(&self, page: u32) -> Result<String, ScraperError> {
        let url = self.listing_url(page);
        tracing::debug!(page, url, "fetching listing page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
