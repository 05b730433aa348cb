//! Fail-open decision engine for forced updates

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::catalog::app_store::AppStoreCatalog;
use crate::catalog::lookup::CatalogLookup;
use crate::config::Config;
use crate::update::app_info::{AppInfo, StaticAppInfo};
use crate::update::error::ResolveError;
use crate::update::opener::{LinkOpener, SystemLinkOpener};
use crate::version::{UpdateLevel, Version};

/// Decides whether the installed app lags far enough behind the catalog to force an update.
///
/// Holds no mutable state, so one checker can serve any number of concurrent
/// evaluations.
pub struct UpdateChecker {
    catalog: Arc<dyn CatalogLookup>,
    app_info: Arc<dyn AppInfo>,
    opener: Arc<dyn LinkOpener>,
    lookup_timeout: Duration,
}

impl UpdateChecker {
    pub fn new(catalog: Arc<dyn CatalogLookup>, app_info: Arc<dyn AppInfo>) -> Self {
        Self {
            catalog,
            app_info,
            opener: Arc::new(SystemLinkOpener),
            lookup_timeout: Duration::from_millis(crate::config::DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }

    /// Build a checker against the App Store using the given configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(AppStoreCatalog::from(&config.catalog)),
            Arc::new(StaticAppInfo::from(&config.app)),
        )
        .with_timeout(Duration::from_millis(config.catalog.timeout))
    }

    /// Bound the catalog lookup. Elapsing counts as a failed lookup.
    pub fn with_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    pub fn with_link_opener(mut self, opener: Arc<dyn LinkOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// Check the installed version against the catalog
    pub async fn check(&self, level: UpdateLevel) -> bool {
        self.evaluate(level, None, None).await
    }

    /// Decide whether an update must be forced.
    ///
    /// # Arguments
    /// * `level` - Policy applied to the version gap
    /// * `local_override` - Compared instead of the installed version
    /// * `remote_override` - Compared instead of the catalog version
    ///
    /// Overrides only apply when both are given. Otherwise both versions are
    /// resolved and a lone override is ignored.
    ///
    /// # Returns
    /// `true` if the update must be forced. Any failure to resolve either version
    /// yields `false`.
    pub async fn evaluate(
        &self,
        level: UpdateLevel,
        local_override: Option<&str>,
        remote_override: Option<&str>,
    ) -> bool {
        match self.resolve_versions(local_override, remote_override).await {
            Ok((local, remote)) => needs_force_update(level, &local, &remote),
            Err(e) => {
                warn!("Skipping force update check: {}", e);
                false
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate), but settles to `false` as soon as `cancel` completes.
    pub async fn evaluate_until<C>(
        &self,
        level: UpdateLevel,
        local_override: Option<&str>,
        remote_override: Option<&str>,
        cancel: C,
    ) -> bool
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            decision = self.evaluate(level, local_override, remote_override) => decision,
            _ = cancel => {
                warn!("Skipping force update check: {}", ResolveError::Cancelled);
                false
            }
        }
    }

    /// URL of the catalog page for this app, if its identifier is known
    pub fn catalog_page_url(&self) -> Option<String> {
        self.app_info
            .app_id()
            .map(|app_id| self.catalog.store_page_url(&app_id))
    }

    /// Open the catalog page. Does nothing if the app identifier is unknown.
    pub fn open_catalog_link(&self) {
        match self.catalog_page_url() {
            Some(url) => self.opener.open(&url),
            None => debug!("No app identifier, not opening catalog page"),
        }
    }

    async fn resolve_versions(
        &self,
        local_override: Option<&str>,
        remote_override: Option<&str>,
    ) -> Result<(String, String), ResolveError> {
        if let (Some(local), Some(remote)) = (local_override, remote_override) {
            return Ok((local.to_string(), remote.to_string()));
        }

        let local = self
            .app_info
            .installed_version()
            .ok_or(ResolveError::MissingInstalledVersion)?;
        let remote = self.fetch_remote_version().await?;

        Ok((local, remote))
    }

    async fn fetch_remote_version(&self) -> Result<String, ResolveError> {
        let app_id = self.app_info.app_id().ok_or(ResolveError::MissingAppId)?;

        let version = timeout(self.lookup_timeout, self.catalog.fetch_version(&app_id))
            .await
            .map_err(|_| ResolveError::TimedOut(self.lookup_timeout))??;

        debug!("Catalog version for app {}: {}", app_id, version);
        Ok(version)
    }
}

/// Compare two raw version strings under `level`
pub fn needs_force_update(level: UpdateLevel, local: &str, remote: &str) -> bool {
    let local_version = Version::parse(local);
    let remote_version = Version::parse(remote);
    let required = level.requires_update(&local_version, &remote_version);

    if required {
        info!(
            "Force update required at {} level: installed {}, published {}",
            level, local_version, remote_version
        );
    } else {
        debug!(
            "No force update at {} level: installed {}, published {}",
            level, local_version, remote_version
        );
    }

    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::catalog::lookup::MockCatalogLookup;
    use crate::update::app_info::MockAppInfo;
    use rstest::rstest;
    use std::sync::Mutex;

    fn app_info(installed: Option<&str>, app_id: Option<&str>) -> Arc<StaticAppInfo> {
        Arc::new(StaticAppInfo::new(
            installed.map(str::to_string),
            app_id.map(str::to_string),
        ))
    }

    fn catalog_returning(version: &'static str) -> Arc<MockCatalogLookup> {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_fetch_version()
            .times(1)
            .returning(move |_| Ok(version.to_string()));
        Arc::new(catalog)
    }

    /// Catalog that never answers within any reasonable timeout
    struct StalledCatalog;

    #[async_trait::async_trait]
    impl CatalogLookup for StalledCatalog {
        async fn fetch_version(&self, _app_id: &str) -> Result<String, CatalogError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("99.0.0".to_string())
        }

        fn store_page_url(&self, app_id: &str) -> String {
            format!("https://example.test/app/id{}", app_id)
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }
    }

    #[rstest]
    #[case(UpdateLevel::Major, "1.0.0", "2.0.0", true)]
    #[case(UpdateLevel::Major, "2.0.0", "1.0.0", false)]
    #[case(UpdateLevel::Major, "1.0.0", "1.4.0", false)]
    #[case(UpdateLevel::Minor, "1.0.0", "1.2.0", true)]
    #[case(UpdateLevel::Minor, "1.4.0", "2.0.0", true)]
    #[case(UpdateLevel::Minor, "1.0.3", "1.0.0", false)]
    #[case(UpdateLevel::Minor, "1.2.0", "1.0.0", false)]
    #[case(UpdateLevel::Patch, "1.0.0", "1.0.1", true)]
    #[case(UpdateLevel::Patch, "1.0.2", "1.0.0", false)]
    #[case(UpdateLevel::Patch, "1.0.0", "1.0.0", false)]
    #[tokio::test]
    async fn evaluate_with_both_overrides_skips_resolution(
        #[case] level: UpdateLevel,
        #[case] local: &str,
        #[case] remote: &str,
        #[case] expected: bool,
    ) {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_fetch_version().never();
        let mut info = MockAppInfo::new();
        info.expect_installed_version().never();
        info.expect_app_id().never();

        let checker = UpdateChecker::new(Arc::new(catalog), Arc::new(info));

        assert_eq!(
            checker.evaluate(level, Some(local), Some(remote)).await,
            expected
        );
    }

    #[tokio::test]
    async fn check_resolves_installed_and_catalog_versions() {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_fetch_version()
            .withf(|app_id: &str| app_id == "1234")
            .times(1)
            .returning(|_| Ok("2.1.0".to_string()));

        let checker =
            UpdateChecker::new(Arc::new(catalog), app_info(Some("2.0.5"), Some("1234")));

        assert!(checker.check(UpdateLevel::Minor).await);
    }

    #[tokio::test]
    async fn check_returns_false_when_catalog_is_not_ahead() {
        let checker = UpdateChecker::new(
            catalog_returning("2.0.9"),
            app_info(Some("2.0.5"), Some("1234")),
        );

        assert!(!checker.check(UpdateLevel::Minor).await);
    }

    #[tokio::test]
    async fn lone_local_override_is_ignored() {
        // Installed 3.0.0 and published 3.0.0: no update, whatever the override says
        let checker =
            UpdateChecker::new(catalog_returning("3.0.0"), app_info(Some("3.0.0"), Some("1")));

        assert!(
            !checker
                .evaluate(UpdateLevel::Major, Some("2.9.9"), None)
                .await
        );
    }

    #[tokio::test]
    async fn lone_remote_override_is_ignored() {
        let checker =
            UpdateChecker::new(catalog_returning("1.0.0"), app_info(Some("1.0.0"), Some("1")));

        assert!(
            !checker
                .evaluate(UpdateLevel::Patch, None, Some("1.0.1"))
                .await
        );
    }

    #[tokio::test]
    async fn lone_remote_override_without_app_id_fails_open() {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_fetch_version().never();

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(Some("1.0.0"), None));

        assert!(
            !checker
                .evaluate(UpdateLevel::Patch, None, Some("9.0.0"))
                .await
        );
    }

    #[rstest]
    #[case(UpdateLevel::Major)]
    #[case(UpdateLevel::Minor)]
    #[case(UpdateLevel::Patch)]
    #[tokio::test]
    async fn missing_app_id_fails_open(#[case] level: UpdateLevel) {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_fetch_version().never();

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(Some("1.0.0"), None));

        assert!(!checker.check(level).await);
    }

    #[rstest]
    #[case(UpdateLevel::Major)]
    #[case(UpdateLevel::Minor)]
    #[case(UpdateLevel::Patch)]
    #[tokio::test]
    async fn missing_installed_version_fails_open(#[case] level: UpdateLevel) {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_fetch_version().never();

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(None, Some("1234")));

        assert!(!checker.check(level).await);
    }

    #[rstest]
    #[case(UpdateLevel::Major)]
    #[case(UpdateLevel::Minor)]
    #[case(UpdateLevel::Patch)]
    #[tokio::test]
    async fn catalog_failure_fails_open(#[case] level: UpdateLevel) {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_fetch_version()
            .times(1)
            .returning(|_| Err(CatalogError::InvalidResponse("Unexpected status: 500".into())));

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(Some("0.1.0"), Some("1")));

        assert!(!checker.check(level).await);
    }

    #[tokio::test]
    async fn lookup_timeout_fails_open() {
        let checker =
            UpdateChecker::new(Arc::new(StalledCatalog), app_info(Some("1.0.0"), Some("1")))
                .with_timeout(Duration::from_millis(20));

        assert!(!checker.check(UpdateLevel::Patch).await);
    }

    #[tokio::test]
    async fn cancellation_settles_to_no_update() {
        let checker =
            UpdateChecker::new(Arc::new(StalledCatalog), app_info(Some("1.0.0"), Some("1")));

        let decision = checker
            .evaluate_until(UpdateLevel::Patch, None, None, std::future::ready(()))
            .await;

        assert!(!decision);
    }

    #[tokio::test]
    async fn evaluate_until_returns_decision_when_not_cancelled() {
        let checker = UpdateChecker::new(Arc::new(StalledCatalog), app_info(None, None));

        let decision = checker
            .evaluate_until(
                UpdateLevel::Major,
                Some("1.0.0"),
                Some("2.0.0"),
                std::future::pending(),
            )
            .await;

        assert!(decision);
    }

    #[tokio::test]
    async fn evaluate_is_idempotent() {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_fetch_version()
            .times(2)
            .returning(|_| Ok("1.3.0".to_string()));

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(Some("1.2.0"), Some("1")));

        assert!(checker.check(UpdateLevel::Minor).await);
        assert!(checker.check(UpdateLevel::Minor).await);
    }

    #[test]
    fn open_catalog_link_opens_store_page() {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_store_page_url()
            .returning(|app_id| format!("https://apps.apple.com/app/id{}", app_id));
        let opener = Arc::new(RecordingOpener::default());

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(None, Some("1234")))
            .with_link_opener(opener.clone());
        checker.open_catalog_link();

        assert_eq!(
            *opener.opened.lock().unwrap(),
            vec!["https://apps.apple.com/app/id1234".to_string()]
        );
    }

    #[test]
    fn open_catalog_link_without_app_id_does_nothing() {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_store_page_url().never();
        let opener = Arc::new(RecordingOpener::default());

        let checker = UpdateChecker::new(Arc::new(catalog), app_info(Some("1.0.0"), None))
            .with_link_opener(opener.clone());
        checker.open_catalog_link();

        assert!(opener.opened.lock().unwrap().is_empty());
        assert_eq!(checker.catalog_page_url(), None);
    }

    #[test]
    fn from_config_uses_configured_storefront() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "app": { "appId": "42" },
            "catalog": { "country": "jp" }
        }))
        .unwrap();

        let checker = UpdateChecker::from_config(&config);

        assert_eq!(
            checker.catalog_page_url().as_deref(),
            Some("https://apps.apple.com/jp/app/id42")
        );
    }
}
