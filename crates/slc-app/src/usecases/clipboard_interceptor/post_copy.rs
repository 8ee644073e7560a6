//! Post-copy strategy.
//!
//! Used where the share action itself copies the link. The rewrite runs
//! after the platform's own click listeners have written the clipboard; that
//! ordering comes from the host's dispatch order and is not enforced here.

use slc_core::ports::ClipboardTextPort;
use slc_core::{LinkNormalizer, Normalizer};
use tracing::{debug, error, info, warn};

/// Result of one post-copy rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostCopyOutcome {
    /// Clipboard now holds the canonical link.
    Rewritten(String),
    /// Clipboard already holds the canonical link; nothing written.
    AlreadyClean(String),
    /// Clipboard text does not mention the platform domain; left untouched.
    NotOurLink,
    /// Platform link without a recognizable video id; left untouched.
    Unrecognized,
    ReadFailed,
    WriteFailed,
}

/// Read the clipboard, and if it holds one of this platform's links,
/// replace it with the canonical form.
pub async fn rewrite_copied_link(
    clipboard: &dyn ClipboardTextPort,
    normalizer: &Normalizer,
) -> PostCopyOutcome {
    let text = match clipboard.read_text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Error reading from clipboard: {}", e);
            return PostCopyOutcome::ReadFailed;
        }
    };
    debug!(clipboard = %text, "Clipboard content");

    let domain = normalizer.domain();
    if !text.contains(domain) {
        info!("No {} URL found in clipboard", domain);
        return PostCopyOutcome::NotOurLink;
    }

    let video = normalizer.extract(&text);
    if !video.is_recognized() {
        warn!("No video id found in {} link, leaving clipboard as is", domain);
        return PostCopyOutcome::Unrecognized;
    }

    let cleaned = normalizer.canonical(&video);
    if cleaned == text.trim() {
        debug!("Clipboard already holds a clean {} link", domain);
        return PostCopyOutcome::AlreadyClean(cleaned);
    }

    match clipboard.write_text(&cleaned).await {
        Ok(()) => {
            info!("Modified {} URL copied to clipboard: {}", domain, cleaned);
            PostCopyOutcome::Rewritten(cleaned)
        }
        Err(e) => {
            error!("Error writing to clipboard: {}", e);
            PostCopyOutcome::WriteFailed
        }
    }
}
