use serde::{Deserialize, Serialize};

use crate::config::ElementOverrides;
use crate::dom::ListenMode;
use crate::ids::ElementId;
use crate::platform::PlatformSpecError;

/// Supported platforms. Selects the normalizer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    YouTube,
    Bilibili,
}

impl PlatformKind {
    /// Key used in configuration tables (`[platforms.<key>]`).
    pub fn config_key(&self) -> &'static str {
        match self {
            PlatformKind::YouTube => "youtube",
            PlatformKind::Bilibili => "bilibili",
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformKind::YouTube => write!(f, "YouTube"),
            PlatformKind::Bilibili => write!(f, "Bilibili"),
        }
    }
}

/// How the cleaned link reaches the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterceptStrategy {
    /// Wrap the copy trigger's click handler and clean before the copy.
    Override,
    /// Let the native share action copy, then rewrite the clipboard.
    PostCopy,
}

/// DOM identifiers a platform handler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub share_trigger: ElementId,
    /// Nested trigger revealed when hovering the share trigger.
    pub inner_trigger: Option<ElementId>,
    pub copy_trigger: Option<ElementId>,
    /// Input field holding the shareable URL.
    pub url_input: Option<ElementId>,
}

/// Immutable per-site configuration.
///
/// 平台配置，启动时创建，之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSpec {
    pub kind: PlatformKind,
    /// Substring matched against the page hostname and clipboard text.
    pub domain: String,
    /// Canonical prefix the identifier is appended to.
    pub short_url: String,
    /// Identifier pattern; capture group 1 holds the identifier body.
    pub id_pattern: String,
    /// Timestamp pattern; capture group 1 holds the digits.
    pub timestamp_pattern: String,
    pub elements: ElementIds,
    pub strategy: InterceptStrategy,
    pub share_listen_mode: ListenMode,
}

impl PlatformSpec {
    pub fn youtube() -> Self {
        Self {
            kind: PlatformKind::YouTube,
            domain: "youtube.com".to_string(),
            short_url: "https://youtu.be/".to_string(),
            id_pattern: r"(?:/|[?&]v=)([A-Za-z0-9_-]{11})".to_string(),
            timestamp_pattern: r"&t=(\d+)".to_string(),
            elements: ElementIds {
                share_trigger: ElementId::from("top-level-buttons-computed"),
                inner_trigger: None,
                copy_trigger: Some(ElementId::from("copy-button")),
                url_input: Some(ElementId::from("share-url")),
            },
            strategy: InterceptStrategy::Override,
            share_listen_mode: ListenMode::Once,
        }
    }

    pub fn bilibili() -> Self {
        Self {
            kind: PlatformKind::Bilibili,
            domain: "bilibili.com".to_string(),
            // b23.tv short links drop the timestamp
            short_url: "https://www.bilibili.com/video/".to_string(),
            id_pattern: r"/BV([A-Za-z0-9]{10})".to_string(),
            timestamp_pattern: r"[?&]t=(\d+)".to_string(),
            elements: ElementIds {
                share_trigger: ElementId::from("share-btn-outer"),
                inner_trigger: Some(ElementId::from("share-btn-inner")),
                copy_trigger: None,
                url_input: None,
            },
            strategy: InterceptStrategy::PostCopy,
            share_listen_mode: ListenMode::Persistent,
        }
    }

    pub fn matches_host(&self, hostname: &str) -> bool {
        hostname.contains(&self.domain)
    }

    /// Apply element id overrides from configuration. Unset fields keep the
    /// built-in ids.
    pub fn with_element_overrides(mut self, overrides: &ElementOverrides) -> Self {
        if let Some(id) = &overrides.share_trigger {
            self.elements.share_trigger = ElementId::from(id.as_str());
        }
        if let Some(id) = &overrides.inner_trigger {
            self.elements.inner_trigger = Some(ElementId::from(id.as_str()));
        }
        if let Some(id) = &overrides.copy_trigger {
            self.elements.copy_trigger = Some(ElementId::from(id.as_str()));
        }
        if let Some(id) = &overrides.url_input {
            self.elements.url_input = Some(ElementId::from(id.as_str()));
        }
        self
    }

    /// The override strategy cannot run without a copy trigger and an input.
    pub fn validate(&self) -> Result<(), PlatformSpecError> {
        if self.strategy == InterceptStrategy::Override {
            if self.elements.copy_trigger.is_none() {
                return Err(PlatformSpecError::MissingElement {
                    platform: self.kind.to_string(),
                    missing: "copy_trigger",
                });
            }
            if self.elements.url_input.is_none() {
                return Err(PlatformSpecError::MissingElement {
                    platform: self.kind.to_string(),
                    missing: "url_input",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_specs_are_valid() {
        assert!(PlatformSpec::youtube().validate().is_ok());
        assert!(PlatformSpec::bilibili().validate().is_ok());
    }

    #[test]
    fn test_matches_host_is_substring_match() {
        let spec = PlatformSpec::youtube();
        assert!(spec.matches_host("www.youtube.com"));
        assert!(spec.matches_host("m.youtube.com"));
        assert!(!spec.matches_host("youtu.be"));
    }

    #[test]
    fn test_override_strategy_requires_copy_trigger() {
        let mut spec = PlatformSpec::youtube();
        spec.elements.copy_trigger = None;

        let err = spec.validate().unwrap_err();
        assert!(matches!(
            err,
            PlatformSpecError::MissingElement {
                missing: "copy_trigger",
                ..
            }
        ));
    }

    #[test]
    fn test_element_overrides_replace_only_set_fields() {
        let overrides = ElementOverrides {
            copy_trigger: Some("copy-button-v2".to_string()),
            ..Default::default()
        };

        let spec = PlatformSpec::youtube().with_element_overrides(&overrides);

        assert_eq!(
            spec.elements.copy_trigger,
            Some(ElementId::from("copy-button-v2"))
        );
        assert_eq!(
            spec.elements.share_trigger,
            ElementId::from("top-level-buttons-computed")
        );
    }
}
