//! Catalog test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use force_update::catalog::app_store::{AppStoreCatalog, DEFAULT_STORE_URL};
use force_update::catalog::error::CatalogError;
use force_update::catalog::lookup::CatalogLookup;
use force_update::update::{StaticAppInfo, UpdateChecker};

/// Mock catalog for testing
#[derive(Default)]
pub struct MockCatalog {
    versions: HashMap<String, String>,
    lookups: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, app_id: &str, version: &str) -> Self {
        self.versions
            .insert(app_id.to_string(), version.to_string());
        self
    }

    /// Number of lookups performed so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogLookup for MockCatalog {
    async fn fetch_version(&self, app_id: &str) -> Result<String, CatalogError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.versions.get(app_id) {
            Some(version) => Ok(version.clone()),
            None => Err(CatalogError::NotFound(app_id.to_string())),
        }
    }

    fn store_page_url(&self, app_id: &str) -> String {
        format!("{}/app/id{}", DEFAULT_STORE_URL, app_id)
    }
}

/// Lookup API response body publishing a single version
pub fn lookup_body(version: &str) -> String {
    format!(
        r#"{{"resultCount": 1, "results": [{{"trackId": 1234, "bundleId": "com.example.app", "version": "{}"}}]}}"#,
        version
    )
}

/// Create a checker against an App Store lookup API served at `lookup_url`
pub fn create_app_store_checker(
    lookup_url: &str,
    installed_version: Option<&str>,
    app_id: Option<&str>,
) -> UpdateChecker {
    UpdateChecker::new(
        Arc::new(AppStoreCatalog::new(lookup_url, DEFAULT_STORE_URL)),
        Arc::new(StaticAppInfo::new(
            installed_version.map(str::to_string),
            app_id.map(str::to_string),
        )),
    )
}
