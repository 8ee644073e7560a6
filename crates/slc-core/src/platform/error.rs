/// Platform configuration errors, raised while building the registry.
///
/// 平台配置错误（仅在启动时出现）。
#[derive(Debug, thiserror::Error)]
pub enum PlatformSpecError {
    #[error("invalid {field} pattern for {platform}: {source}")]
    InvalidPattern {
        platform: String,
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{platform} uses the override strategy but has no {missing} element configured")]
    MissingElement {
        platform: String,
        missing: &'static str,
    },
}
