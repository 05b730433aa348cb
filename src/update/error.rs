use std::time::Duration;

use thiserror::Error;

use crate::catalog::error::CatalogError;

/// Reasons a version could not be resolved. Never surfaced past the checker.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("App identifier is not available")]
    MissingAppId,

    #[error("Installed version is not available")]
    MissingInstalledVersion,

    #[error("Catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Catalog lookup timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Update check was cancelled")]
    Cancelled,
}
