//! App Store lookup API implementation

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::error::CatalogError;
use crate::catalog::lookup::CatalogLookup;
use crate::config::CatalogConfig;

/// Default base URL for the lookup API
pub const DEFAULT_LOOKUP_URL: &str = "https://itunes.apple.com";

/// Default base URL for app store pages
pub const DEFAULT_STORE_URL: &str = "https://apps.apple.com";

/// Response from the lookup API
#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    version: Option<String>,
}

/// Catalog implementation for the App Store lookup API
#[derive(Clone)]
pub struct AppStoreCatalog {
    client: reqwest::Client,
    lookup_url: String,
    store_url: String,
    country: Option<String>,
}

impl AppStoreCatalog {
    /// Creates a new AppStoreCatalog with custom base URLs
    pub fn new(lookup_url: &str, store_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("force-update")
                .build()
                .unwrap_or_default(),
            lookup_url: lookup_url.trim_end_matches('/').to_string(),
            store_url: store_url.trim_end_matches('/').to_string(),
            country: None,
        }
    }

    /// Restricts lookups and store pages to a storefront (e.g., "jp", "us")
    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country.filter(|c| !c.is_empty());
        self
    }

    fn storefront_prefix(&self, base: &str) -> String {
        match &self.country {
            Some(country) => format!("{}/{}", base, country),
            None => base.to_string(),
        }
    }

    /// Builds the lookup URL with the app id form-encoded into the query
    fn lookup_endpoint(&self, app_id: &str) -> Result<reqwest::Url, CatalogError> {
        let base = format!("{}/lookup", self.storefront_prefix(&self.lookup_url));
        reqwest::Url::parse_with_params(&base, &[("id", app_id)])
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", base, e)))
    }
}

impl Default for AppStoreCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_URL, DEFAULT_STORE_URL)
    }
}

impl From<&CatalogConfig> for AppStoreCatalog {
    fn from(config: &CatalogConfig) -> Self {
        Self::new(&config.lookup_url, &config.store_url).with_country(config.country.clone())
    }
}

#[async_trait]
impl CatalogLookup for AppStoreCatalog {
    async fn fetch_version(&self, app_id: &str) -> Result<String, CatalogError> {
        let url = self.lookup_endpoint(app_id)?;
        debug!("Looking up app in catalog: {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(app_id.to_string()));
        }

        if status != reqwest::StatusCode::OK {
            warn!("Catalog returned status {}: {}", status, url);
            return Err(CatalogError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse catalog response: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        let Some(first) = lookup.results.into_iter().next() else {
            return Err(CatalogError::NotFound(app_id.to_string()));
        };

        first.version.ok_or_else(|| {
            CatalogError::InvalidResponse(format!("No version field for app {}", app_id))
        })
    }

    fn store_page_url(&self, app_id: &str) -> String {
        format!("{}/app/id{}", self.storefront_prefix(&self.store_url), app_id)
    }
}
