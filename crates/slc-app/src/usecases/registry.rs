//! Platform registry.
//!
//! Maps a page hostname to the platform whose handler should run there.
//! Built once at startup and read-only afterwards.

use std::sync::Arc;

use slc_core::platform::PlatformSpecError;
use slc_core::{CleanerConfig, LinkNormalizer, Normalizer, PlatformKind, PlatformSpec};
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::usecases::element_watcher::WatchPolicy;
use crate::usecases::site_handler::{PageHost, SiteHandler};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("platform {0} is registered more than once")]
    DuplicatePlatform(PlatformKind),

    #[error(transparent)]
    InvalidPlatform(#[from] PlatformSpecError),
}

/// A platform spec together with its compiled normalizer.
#[derive(Debug, Clone)]
pub struct RegisteredPlatform {
    spec: Arc<PlatformSpec>,
    normalizer: Arc<Normalizer>,
}

impl RegisteredPlatform {
    pub fn new(spec: PlatformSpec) -> Result<Self, PlatformSpecError> {
        spec.validate()?;
        let normalizer = Normalizer::from_spec(&spec)?;
        Ok(Self {
            spec: Arc::new(spec),
            normalizer: Arc::new(normalizer),
        })
    }

    pub fn kind(&self) -> PlatformKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &PlatformSpec {
        &self.spec
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Whether `link` points at this platform: its host contains the
    /// platform domain or is the canonical short host.
    fn claims_link(&self, link: &str) -> bool {
        let host = link_host(link).to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        host.contains(&self.spec.domain) || host == link_host(&self.spec.short_url)
    }
}

/// Host part of a link, with or without scheme.
fn link_host(link: &str) -> &str {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(link);
    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Links in copied text, in order of appearance.
///
/// Share texts wrap the link in a title (`【Title】 https://...`), so only
/// `http(s)://` runs count. Text without any is taken as a bare link when it
/// is a single word.
fn links_in(text: &str) -> Vec<&str> {
    let mut links: Vec<&str> = text
        .match_indices("http")
        .map(|(start, _)| &text[start..])
        .filter(|rest| rest.starts_with("https://") || rest.starts_with("http://"))
        .map(|rest| {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            &rest[..end]
        })
        .collect();

    if links.is_empty() {
        let trimmed = text.trim();
        if !trimmed.is_empty() && !trimmed.contains(char::is_whitespace) {
            links.push(trimmed);
        }
    }
    links
}

/// Ordered list of supported platforms. First match wins.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    platforms: Vec<RegisteredPlatform>,
    policy: WatchPolicy,
}

impl HandlerRegistry {
    pub fn new(specs: impl IntoIterator<Item = PlatformSpec>) -> Result<Self, RegistryError> {
        let mut platforms: Vec<RegisteredPlatform> = Vec::new();
        for spec in specs {
            if platforms.iter().any(|p| p.kind() == spec.kind) {
                return Err(RegistryError::DuplicatePlatform(spec.kind));
            }
            platforms.push(RegisteredPlatform::new(spec)?);
        }
        Ok(Self {
            platforms,
            policy: WatchPolicy::default(),
        })
    }

    /// YouTube, then Bilibili, with built-in element ids.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new([PlatformSpec::youtube(), PlatformSpec::bilibili()])
    }

    /// Built-in platforms with configured element ids and watcher policy.
    /// Platforms disabled in the configuration are left out.
    pub fn from_config(config: &CleanerConfig) -> Result<Self, RegistryError> {
        let specs = [PlatformSpec::youtube(), PlatformSpec::bilibili()]
            .into_iter()
            .filter_map(|spec| match config.overrides_for(spec.kind.config_key()) {
                Some(overrides) if !overrides.enabled => {
                    info!(platform = %spec.kind, "Platform disabled by configuration");
                    None
                }
                Some(overrides) => Some(spec.with_element_overrides(overrides)),
                None => Some(spec),
            });

        Ok(Self::new(specs)?.with_policy(WatchPolicy::from(&config.watcher)))
    }

    pub fn with_policy(mut self, policy: WatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> WatchPolicy {
        self.policy
    }

    pub fn platforms(&self) -> &[RegisteredPlatform] {
        &self.platforms
    }

    /// Platform whose domain is contained in `hostname`.
    pub fn select(&self, hostname: &str) -> Option<&RegisteredPlatform> {
        self.platforms.iter().find(|p| p.spec.matches_host(hostname))
    }

    /// Platform a copied link belongs to.
    pub fn select_for_link(&self, text: &str) -> Option<&RegisteredPlatform> {
        self.find_link(text).map(|(platform, _)| platform)
    }

    /// First link in `text` that a registered platform claims, together
    /// with that platform. Words around the link never decide the platform.
    pub fn find_link<'a>(&self, text: &'a str) -> Option<(&RegisteredPlatform, &'a str)> {
        links_in(text).into_iter().find_map(|link| {
            self.platforms
                .iter()
                .find(|p| p.claims_link(link))
                .map(|platform| (platform, link))
        })
    }

    /// Create and start the handler for one page load.
    ///
    /// Must run inside a tokio runtime. Returns `None` without touching the
    /// page when the hostname is not supported.
    pub fn launch(&self, hostname: &str, host: PageHost) -> Option<Arc<SiteHandler>> {
        let Some(platform) = self.select(hostname) else {
            debug!(hostname, "Current domain is not supported");
            return None;
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Cannot start handler outside a tokio runtime: {}", e);
                return None;
            }
        };

        debug!(
            hostname,
            platform = %platform.kind(),
            domain = platform.normalizer.domain(),
            "Handler found"
        );
        let handler = SiteHandler::new(
            platform.spec.clone(),
            platform.normalizer.clone(),
            host,
            self.policy,
            runtime,
        );
        handler.start();
        Some(handler)
    }
}
