//! Accessor for metadata of the installed app

#[cfg(test)]
use mockall::automock;

use crate::config::AppConfig;

/// Trait for reading the installed app's identity
///
/// `None` is a normal outcome (e.g. a development build without a catalog id)
/// and makes the update check fail open.
#[cfg_attr(test, automock)]
pub trait AppInfo: Send + Sync {
    /// Version string of the installed build
    fn installed_version(&self) -> Option<String>;

    /// Catalog identifier of the app
    fn app_id(&self) -> Option<String>;
}

/// AppInfo backed by fixed values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAppInfo {
    installed_version: Option<String>,
    app_id: Option<String>,
}

impl StaticAppInfo {
    pub fn new(installed_version: Option<String>, app_id: Option<String>) -> Self {
        Self {
            installed_version,
            app_id,
        }
    }
}

impl From<&AppConfig> for StaticAppInfo {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.installed_version.clone(), config.app_id.clone())
    }
}

impl AppInfo for StaticAppInfo {
    fn installed_version(&self) -> Option<String> {
        self.installed_version.clone()
    }

    fn app_id(&self) -> Option<String> {
        self.app_id.clone()
    }
}
