//! # slc-core
//!
//! Core domain models and link normalization for Share Link Cleaner.
//!
//! This crate contains pure logic: platform specs, normalizers, the handler
//! state machine and the port traits the host implements. No runtime, no
//! clipboard backend, no DOM.

pub mod config;
pub mod dom;
pub mod handler;
pub mod ids;
pub mod platform;
pub mod ports;

// Re-export commonly used types at the crate root
pub use config::CleanerConfig;
pub use dom::{DomEvent, ElementHandle, ListenMode};
pub use handler::{HandlerPhase, HandlerState};
pub use ids::ElementId;
pub use platform::{
    InterceptStrategy, LinkNormalizer, Normalizer, PlatformKind, PlatformSpec, VideoReference,
};
