use std::collections::BTreeMap;

/// Element watcher settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherSettings {
    pub poll_interval_ms: u64,
    /// `None` polls for the lifetime of the page.
    pub max_attempts: Option<u32>,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_attempts: None,
        }
    }
}

/// Per-platform element id overrides (`[platforms.<key>]`).
///
/// 平台元素 id 覆盖配置，未设置的字段沿用内置值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOverrides {
    pub enabled: bool,
    pub share_trigger: Option<String>,
    pub inner_trigger: Option<String>,
    pub copy_trigger: Option<String>,
    pub url_input: Option<String>,
}

impl Default for ElementOverrides {
    fn default() -> Self {
        Self {
            enabled: true,
            share_trigger: None,
            inner_trigger: None,
            copy_trigger: None,
            url_input: None,
        }
    }
}

/// Cleaner configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanerConfig {
    pub watcher: WatcherSettings,
    /// Keyed by `PlatformKind::config_key`.
    pub platforms: BTreeMap<String, ElementOverrides>,
}

impl CleanerConfig {
    /// Create CleanerConfig from TOML value
    ///
    /// Missing keys fall back to the defaults; keys of the wrong type are
    /// treated as missing.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = WatcherSettings::default();
        let watcher = WatcherSettings {
            poll_interval_ms: toml_value
                .get("watcher")
                .and_then(|w| w.get("poll_interval_ms"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(1) as u64)
                .unwrap_or(defaults.poll_interval_ms),
            max_attempts: toml_value
                .get("watcher")
                .and_then(|w| w.get("max_attempts"))
                .and_then(|v| v.as_integer())
                .map(|v| v.clamp(1, u32::MAX as i64) as u32),
        };

        let mut platforms = BTreeMap::new();
        if let Some(table) = toml_value.get("platforms").and_then(|p| p.as_table()) {
            for (key, entry) in table {
                let text = |field: &str| {
                    entry
                        .get(field)
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string())
                };
                platforms.insert(
                    key.clone(),
                    ElementOverrides {
                        enabled: entry
                            .get("enabled")
                            .and_then(|v| v.as_bool())
                            .unwrap_or(true),
                        share_trigger: text("share_trigger"),
                        inner_trigger: text("inner_trigger"),
                        copy_trigger: text("copy_trigger"),
                        url_input: text("url_input"),
                    },
                );
            }
        }

        Ok(Self { watcher, platforms })
    }

    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        let value: toml::Value = toml::from_str(source)?;
        Self::from_toml(&value)
    }

    pub fn overrides_for(&self, key: &str) -> Option<&ElementOverrides> {
        self.platforms.get(key)
    }
}
