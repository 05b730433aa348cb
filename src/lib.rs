//! Decide whether an installed app must be updated before it can be used.
//!
//! The installed version is compared against the version published in an app
//! catalog under an [`UpdateLevel`](version::UpdateLevel) policy. Every failure
//! along the way (no catalog id, network errors, malformed responses) resolves
//! to "no update needed".

pub mod catalog;
pub mod config;
pub mod logging;
pub mod update;
pub mod version;
