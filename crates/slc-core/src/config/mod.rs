//! # Pure Data Module - Data Transfer Objects Only
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! No validation and no merging here: the registry decides how overrides
//! combine with the built-in platform specs.

mod cleaner_config;

pub use cleaner_config::{CleanerConfig, ElementOverrides, WatcherSettings};
