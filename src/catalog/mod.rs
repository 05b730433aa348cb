//! Remote app catalog access
//!
//! # Modules
//!
//! - [`lookup`]: Trait for fetching the published version of an app
//! - [`app_store`]: App Store lookup API implementation
//! - [`error`]: Error types for catalog lookups

pub mod app_store;
pub mod error;
pub mod lookup;

pub use app_store::AppStoreCatalog;
pub use error::CatalogError;
pub use lookup::CatalogLookup;
