//! Override strategy.
//!
//! Replaces the copy trigger's `onclick` with a wrapper that cleans the
//! share dialog's URL input, writes the cleaned link to the clipboard and
//! then hands over to the platform's original handler.

use std::sync::{Arc, Weak};

use anyhow::anyhow;
use slc_core::dom::ClickHandler;
use slc_core::ids::ElementId;
use slc_core::ports::{ClipboardTextPort, DomPort};
use slc_core::{HandlerState, LinkNormalizer, Normalizer};
use tokio::runtime::Handle;
use tracing::{error, info, info_span, warn, Instrument};

/// What one intercepted copy click did to the URL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Input rewritten; the cleaned link is being written to the clipboard.
    Cleaned(String),
    /// No video id in the input; input and clipboard left to the platform.
    PassedThrough,
    /// The URL input is not on the page.
    InputMissing,
}

/// Installs the copy override for one page.
pub struct CopyOverride {
    dom: Arc<dyn DomPort>,
    clipboard: Arc<dyn ClipboardTextPort>,
    normalizer: Arc<Normalizer>,
    url_input: ElementId,
    runtime: Handle,
}

impl CopyOverride {
    pub fn new(
        dom: Arc<dyn DomPort>,
        clipboard: Arc<dyn ClipboardTextPort>,
        normalizer: Arc<Normalizer>,
        url_input: ElementId,
        runtime: Handle,
    ) -> Self {
        Self {
            dom,
            clipboard,
            normalizer,
            url_input,
            runtime,
        }
    }

    /// Wrap the click handler of the copy trigger recorded in `state`.
    ///
    /// # Returns
    /// - `Ok(true)` when the override was installed by this call
    /// - `Ok(false)` when it was already installed
    /// - `Err` when the copy trigger is unresolved or has been detached
    pub fn install(&self, state: &mut HandlerState) -> anyhow::Result<bool> {
        if state.override_installed {
            return Ok(false);
        }
        let copy_trigger = state
            .copy_trigger
            .clone()
            .ok_or_else(|| anyhow!("copy trigger has not been resolved"))?;

        let click = CopyClick {
            dom: Arc::downgrade(&self.dom),
            clipboard: self.clipboard.clone(),
            normalizer: self.normalizer.clone(),
            url_input: self.url_input.clone(),
            runtime: self.runtime.clone(),
            original: self.dom.click_handler(&copy_trigger),
        };
        let handler: ClickHandler = Arc::new(move || click.run());

        self.dom.set_click_handler(&copy_trigger, handler)?;
        state.override_installed = true;
        info!(element = %copy_trigger.id(), "Copy override installed");
        Ok(true)
    }
}

/// State captured by the installed click handler. Holds the page weakly so
/// the page can drop its own handlers.
struct CopyClick {
    dom: Weak<dyn DomPort>,
    clipboard: Arc<dyn ClipboardTextPort>,
    normalizer: Arc<Normalizer>,
    url_input: ElementId,
    runtime: Handle,
    original: Option<ClickHandler>,
}

impl CopyClick {
    fn run(&self) {
        if let Some(dom) = self.dom.upgrade() {
            if let CopyOutcome::Cleaned(cleaned) =
                clean_url_input(dom.as_ref(), &self.normalizer, &self.url_input)
            {
                let clipboard = self.clipboard.clone();
                let span = info_span!("usecase.override_copy.write_clipboard");
                self.runtime.spawn(
                    async move {
                        write_cleaned_link(clipboard.as_ref(), &cleaned).await;
                    }
                    .instrument(span),
                );
            }
        }

        // Platform side effects (toast, analytics, its own copy) still run.
        if let Some(original) = &self.original {
            original();
        }
    }
}

/// Replace the URL input's value with its canonical form.
pub fn clean_url_input(
    dom: &dyn DomPort,
    normalizer: &Normalizer,
    url_input: &ElementId,
) -> CopyOutcome {
    let Some(original_url) = dom.input_value(url_input) else {
        warn!(element = %url_input, "Share URL input not found");
        return CopyOutcome::InputMissing;
    };

    let video = normalizer.extract(&original_url);
    if !video.is_recognized() {
        warn!("No video id found in {}, leaving it unchanged", original_url);
        return CopyOutcome::PassedThrough;
    }

    let cleaned = normalizer.canonical(&video);
    if let Err(e) = dom.set_input_value(url_input, &cleaned) {
        warn!(element = %url_input, "Failed to update share URL input: {}", e);
    }
    CopyOutcome::Cleaned(cleaned)
}

/// Best-effort clipboard write. Failures are logged, never retried.
pub async fn write_cleaned_link(clipboard: &dyn ClipboardTextPort, cleaned: &str) -> bool {
    match clipboard.write_text(cleaned).await {
        Ok(()) => {
            info!("Modified URL copied to clipboard: {}", cleaned);
            true
        }
        Err(e) => {
            error!("Error copying modified URL: {}", e);
            false
        }
    }
}
