//! Command handlers behind the CLI.

use anyhow::Context;
use slc_app::usecases::clipboard_interceptor::PostCopyOutcome;
use slc_app::HandlerRegistry;
use slc_core::ports::ClipboardTextPort;
use slc_core::{LinkNormalizer, PlatformKind};
use slc_platform::adapters::SystemClipboard;
use tracing::{info, info_span, Instrument};

use crate::cli::Command;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("not a link from a supported platform: {0}")]
    UnsupportedLink(String),

    #[error("no {platform} video id found in {url}")]
    NoVideoId { platform: PlatformKind, url: String },
}

/// Canonical form of `url` for whichever platform claims it.
pub fn clean_link(registry: &HandlerRegistry, url: &str) -> Result<String, CommandError> {
    let (platform, link) = registry
        .find_link(url)
        .ok_or_else(|| CommandError::UnsupportedLink(url.to_string()))?;

    let normalizer = platform.normalizer();
    let video = normalizer.extract(link);
    if !video.is_recognized() {
        return Err(CommandError::NoVideoId {
            platform: platform.kind(),
            url: url.to_string(),
        });
    }
    Ok(normalizer.canonical(&video))
}

/// Rewrite the clipboard in place when it holds a supported link.
///
/// Unlike the in-page post-copy rewrite, access failures are returned so the
/// command can exit non-zero.
pub async fn clean_clipboard(
    registry: &HandlerRegistry,
    clipboard: &dyn ClipboardTextPort,
) -> anyhow::Result<PostCopyOutcome> {
    let text = clipboard
        .read_text()
        .await
        .context("Failed to read clipboard")?;
    info!("Clipboard contents: {}", text);

    let cleaned = match clean_link(registry, &text) {
        Ok(cleaned) => cleaned,
        Err(CommandError::UnsupportedLink(_)) => return Ok(PostCopyOutcome::NotOurLink),
        Err(CommandError::NoVideoId { .. }) => return Ok(PostCopyOutcome::Unrecognized),
    };

    if cleaned == text.trim() {
        return Ok(PostCopyOutcome::AlreadyClean(cleaned));
    }

    clipboard
        .write_text(&cleaned)
        .await
        .context("Failed to write clipboard")?;
    info!("Modified URL copied to clipboard: {}", cleaned);
    Ok(PostCopyOutcome::Rewritten(cleaned))
}

/// One line per registered platform.
pub fn platform_lines(registry: &HandlerRegistry) -> Vec<String> {
    registry
        .platforms()
        .iter()
        .map(|platform| {
            let spec = platform.spec();
            let optional = |id: &Option<slc_core::ElementId>| {
                id.as_ref()
                    .map(|id| id.as_str().to_string())
                    .unwrap_or_else(|| "-".to_string())
            };
            format!(
                "{:<9} {:<13} {:?} share={} inner={} copy={} input={}",
                spec.kind.to_string(),
                spec.domain,
                spec.strategy,
                spec.elements.share_trigger.as_str(),
                optional(&spec.elements.inner_trigger),
                optional(&spec.elements.copy_trigger),
                optional(&spec.elements.url_input),
            )
        })
        .collect()
}

pub async fn run(command: Command, registry: &HandlerRegistry) -> anyhow::Result<()> {
    match command {
        Command::Clean { url, copy } => {
            let cleaned = clean_link(registry, &url)?;
            println!("{}", cleaned);
            if copy {
                let clipboard = SystemClipboard::new()?;
                clipboard
                    .write_text(&cleaned)
                    .instrument(info_span!("command.clean.copy"))
                    .await
                    .context("Failed to write clipboard")?;
                info!("Modified URL copied to clipboard: {}", cleaned);
            }
        }
        Command::Clipboard => {
            let clipboard = SystemClipboard::new()?;
            let outcome = clean_clipboard(registry, &clipboard)
                .instrument(info_span!("command.clipboard"))
                .await?;
            match outcome {
                PostCopyOutcome::Rewritten(link) | PostCopyOutcome::AlreadyClean(link) => {
                    println!("{}", link)
                }
                other => info!(outcome = ?other, "Clipboard left unchanged"),
            }
        }
        Command::Platforms => {
            for line in platform_lines(registry) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
