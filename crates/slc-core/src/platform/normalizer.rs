//! Link normalizers.
//!
//! Each platform is an independent struct implementing [`LinkNormalizer`];
//! [`Normalizer`] tags them by platform so the registry dispatches with a
//! `match` instead of trait objects.

use regex::Regex;

use crate::platform::{PlatformKind, PlatformSpec, PlatformSpecError, VideoReference};

/// Capability set shared by every platform normalizer.
pub trait LinkNormalizer {
    /// Domain substring that marks a link as belonging to this platform.
    fn domain(&self) -> &str;

    /// Canonical prefix, e.g. `https://youtu.be/`.
    fn short_url(&self) -> &str;

    /// Pull the identifier and timestamp out of a raw link. Never fails;
    /// unrecognized input yields [`VideoReference::unrecognized`].
    fn extract(&self, url: &str) -> VideoReference;

    /// Platform-specific tail appended to [`LinkNormalizer::short_url`].
    fn render(&self, video: &VideoReference) -> String;

    fn canonical(&self, video: &VideoReference) -> String {
        format!("{}{}", self.short_url(), self.render(video))
    }

    /// `short_url + render(extract(url))`. Unrecognized input degrades to
    /// the bare prefix.
    fn clean(&self, url: &str) -> String {
        self.canonical(&self.extract(url))
    }
}

#[derive(Debug, Clone)]
struct LinkPatterns {
    id: Regex,
    timestamp: Regex,
}

impl LinkPatterns {
    fn compile(spec: &PlatformSpec) -> Result<Self, PlatformSpecError> {
        let id = Regex::new(&spec.id_pattern).map_err(|source| {
            PlatformSpecError::InvalidPattern {
                platform: spec.kind.to_string(),
                field: "identifier",
                source,
            }
        })?;
        let timestamp = Regex::new(&spec.timestamp_pattern).map_err(|source| {
            PlatformSpecError::InvalidPattern {
                platform: spec.kind.to_string(),
                field: "timestamp",
                source,
            }
        })?;
        Ok(Self { id, timestamp })
    }

    fn identifier<'a>(&self, url: &'a str) -> Option<&'a str> {
        self.id
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    fn timestamp(&self, url: &str) -> Option<String> {
        self.timestamp
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// `https://youtu.be/<id>[&t=<seconds>]`
#[derive(Debug, Clone)]
pub struct YouTubeNormalizer {
    domain: String,
    short_url: String,
    patterns: LinkPatterns,
}

impl YouTubeNormalizer {
    pub fn new(spec: &PlatformSpec) -> Result<Self, PlatformSpecError> {
        Ok(Self {
            domain: spec.domain.clone(),
            short_url: spec.short_url.clone(),
            patterns: LinkPatterns::compile(spec)?,
        })
    }
}

impl LinkNormalizer for YouTubeNormalizer {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn short_url(&self) -> &str {
        &self.short_url
    }

    fn extract(&self, url: &str) -> VideoReference {
        match self.patterns.identifier(url) {
            Some(id) => VideoReference::new(id, self.patterns.timestamp(url)),
            None => VideoReference::unrecognized(),
        }
    }

    fn render(&self, video: &VideoReference) -> String {
        if !video.is_recognized() {
            return String::new();
        }
        match &video.timestamp {
            Some(t) => format!("{}&t={}", video.identifier, t),
            None => video.identifier.clone(),
        }
    }
}

/// `https://www.bilibili.com/video/BV<id>/[?t=<seconds>]`
///
/// The trailing slash before the query is part of the canonical form.
#[derive(Debug, Clone)]
pub struct BilibiliNormalizer {
    domain: String,
    short_url: String,
    patterns: LinkPatterns,
}

impl BilibiliNormalizer {
    const ID_TAG: &'static str = "BV";

    pub fn new(spec: &PlatformSpec) -> Result<Self, PlatformSpecError> {
        Ok(Self {
            domain: spec.domain.clone(),
            short_url: spec.short_url.clone(),
            patterns: LinkPatterns::compile(spec)?,
        })
    }
}

impl LinkNormalizer for BilibiliNormalizer {
    fn domain(&self) -> &str {
        &self.domain
    }

    fn short_url(&self) -> &str {
        &self.short_url
    }

    fn extract(&self, url: &str) -> VideoReference {
        match self.patterns.identifier(url) {
            Some(id) => VideoReference::new(
                format!("{}{}", Self::ID_TAG, id),
                self.patterns.timestamp(url),
            ),
            None => VideoReference::unrecognized(),
        }
    }

    fn render(&self, video: &VideoReference) -> String {
        if !video.is_recognized() {
            return String::new();
        }
        match &video.timestamp {
            Some(t) => format!("{}/?t={}", video.identifier, t),
            None => format!("{}/", video.identifier),
        }
    }
}

/// Platform-tagged normalizer.
#[derive(Debug, Clone)]
pub enum Normalizer {
    YouTube(YouTubeNormalizer),
    Bilibili(BilibiliNormalizer),
}

impl Normalizer {
    pub fn from_spec(spec: &PlatformSpec) -> Result<Self, PlatformSpecError> {
        Ok(match spec.kind {
            PlatformKind::YouTube => Normalizer::YouTube(YouTubeNormalizer::new(spec)?),
            PlatformKind::Bilibili => Normalizer::Bilibili(BilibiliNormalizer::new(spec)?),
        })
    }

    pub fn kind(&self) -> PlatformKind {
        match self {
            Normalizer::YouTube(_) => PlatformKind::YouTube,
            Normalizer::Bilibili(_) => PlatformKind::Bilibili,
        }
    }
}

impl LinkNormalizer for Normalizer {
    fn domain(&self) -> &str {
        match self {
            Normalizer::YouTube(n) => n.domain(),
            Normalizer::Bilibili(n) => n.domain(),
        }
    }

    fn short_url(&self) -> &str {
        match self {
            Normalizer::YouTube(n) => n.short_url(),
            Normalizer::Bilibili(n) => n.short_url(),
        }
    }

    fn extract(&self, url: &str) -> VideoReference {
        match self {
            Normalizer::YouTube(n) => n.extract(url),
            Normalizer::Bilibili(n) => n.extract(url),
        }
    }

    fn render(&self, video: &VideoReference) -> String {
        match self {
            Normalizer::YouTube(n) => n.render(video),
            Normalizer::Bilibili(n) => n.render(video),
        }
    }
}
