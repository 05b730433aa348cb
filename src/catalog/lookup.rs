//! Catalog trait for fetching the published version of an app

#[cfg(test)]
use mockall::automock;

use crate::catalog::error::CatalogError;

/// Trait for looking up an app in a remote catalog
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetches the currently published version string for an app
    ///
    /// # Arguments
    /// * `app_id` - The catalog identifier of the app (e.g., "284882215")
    ///
    /// # Returns
    /// * `Ok(String)` - The raw version string as published
    /// * `Err(CatalogError)` - If the request fails or the response has no usable version
    async fn fetch_version(&self, app_id: &str) -> Result<String, CatalogError>;

    /// Returns the URL of the catalog page where the app can be updated
    fn store_page_url(&self, app_id: &str) -> String;
}
