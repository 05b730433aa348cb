//! Prompt presentation for hosts
//!
//! The checker only decides. A host renders the decision through an
//! [`UpdatePresenter`], and a [`ForceUpdateGate`] makes sure that happens at
//! most once per screen.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::update::checker::UpdateChecker;
use crate::version::UpdateLevel;

/// Text shown in the default update prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCopy {
    pub title: String,
    pub message: String,
    pub action_label: String,
}

impl Default for PromptCopy {
    fn default() -> Self {
        Self {
            title: "Update Required".to_string(),
            message: "A new version is available. Please update to the latest version to \
                      continue using the app."
                .to_string(),
            action_label: "Update Now".to_string(),
        }
    }
}

/// A prompt handed to a presenter. Its single action opens the catalog page.
pub struct UpdatePrompt<'a> {
    copy: &'a PromptCopy,
    checker: &'a UpdateChecker,
}

impl<'a> UpdatePrompt<'a> {
    pub fn new(copy: &'a PromptCopy, checker: &'a UpdateChecker) -> Self {
        Self { copy, checker }
    }

    pub fn copy(&self) -> &PromptCopy {
        self.copy
    }

    /// URL the action leads to, if the app identifier is known
    pub fn catalog_url(&self) -> Option<String> {
        self.checker.catalog_page_url()
    }

    /// Run the prompt's action
    pub fn open_catalog(&self) {
        self.checker.open_catalog_link();
    }
}

/// Renders an update prompt
///
/// Implementations may show the default copy as an alert or ignore it and
/// render a custom dialog.
pub trait UpdatePresenter: Send + Sync {
    fn present(&self, prompt: &UpdatePrompt<'_>);
}

/// One-shot "show prompt" flag for a single presentation lifecycle
///
/// The flag moves from `false` to `true` at most once and never resets.
#[derive(Debug, Default)]
pub struct ForceUpdateGate {
    presented: AtomicBool,
    copy: PromptCopy,
}

impl ForceUpdateGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_copy(copy: PromptCopy) -> Self {
        Self {
            presented: AtomicBool::new(false),
            copy,
        }
    }

    pub fn is_presented(&self) -> bool {
        self.presented.load(Ordering::Acquire)
    }

    /// Evaluate once and present the prompt if an update is required.
    ///
    /// Returns true if this call presented the prompt.
    pub async fn check_and_present(
        &self,
        checker: &UpdateChecker,
        level: UpdateLevel,
        presenter: &dyn UpdatePresenter,
    ) -> bool {
        if self.is_presented() {
            debug!("Update prompt already presented");
            return false;
        }

        let decision = checker.check(level).await;
        self.present_if(decision, checker, presenter)
    }

    /// Present the prompt for a decision that was already made.
    ///
    /// Returns true if this call presented the prompt.
    pub fn present_if(
        &self,
        decision: bool,
        checker: &UpdateChecker,
        presenter: &dyn UpdatePresenter,
    ) -> bool {
        if !decision {
            return false;
        }

        // Another check on the same gate may have won while we were waiting.
        if self
            .presented
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        info!("Presenting update prompt");
        presenter.present(&UpdatePrompt::new(&self.copy, checker));
        true
    }
}
