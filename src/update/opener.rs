//! Opening the catalog page

use std::io;

use tracing::{error, info};

/// Trait for handing a URL to whatever can display it
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Opens URLs with the system's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) {
        info!("Opening catalog page {}", url);
        report_open_result(url, open::that(url));
    }
}

/// Log a failed hand-off. Returns true if the URL was handed to the system.
fn report_open_result(url: &str, result: io::Result<()>) -> bool {
    if let Err(e) = result {
        error!("Failed to open {}: {}", url, e);
        return false;
    }
    true
}
