//! Per-platform configuration and link normalization.

mod error;
mod normalizer;
mod spec;
mod video;

pub use error::PlatformSpecError;
pub use normalizer::{BilibiliNormalizer, LinkNormalizer, Normalizer, YouTubeNormalizer};
pub use spec::{ElementIds, InterceptStrategy, PlatformKind, PlatformSpec};
pub use video::VideoReference;
