//! Force update decision layer
//!
//! Resolves the installed and published versions, applies an [`UpdateLevel`]
//! and hands a positive decision to a host presenter at most once.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   AppInfo   │────▶│   Checker   │◀────│   Catalog   │
//! │ (installed) │     │  (decide)   │     │  (lookup)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │    Gate     │──▶ UpdatePresenter
//!                     │ (one-shot)  │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app_info`]: Accessor for the installed version and catalog identifier
//! - [`checker`]: The fail-open decision engine
//! - [`error`]: Resolution failures, logged and absorbed by the checker
//! - [`opener`]: Opening the catalog page
//! - [`prompt`]: Prompt copy, presenters and the one-shot gate
//!
//! [`UpdateLevel`]: crate::version::UpdateLevel

pub mod app_info;
pub mod checker;
pub mod error;
pub mod opener;
pub mod prompt;

pub use app_info::{AppInfo, StaticAppInfo};
pub use checker::UpdateChecker;
pub use error::ResolveError;
pub use opener::{LinkOpener, SystemLinkOpener};
pub use prompt::{ForceUpdateGate, PromptCopy, UpdatePresenter, UpdatePrompt};
