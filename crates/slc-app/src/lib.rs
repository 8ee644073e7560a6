//! Share Link Cleaner application layer
//!
//! Use cases that drive a page: element watching, clipboard interception,
//! the per-site handler lifecycle and the handler registry.

pub mod usecases;

pub use usecases::{
    ElementWatcher, HandlerRegistry, PageHost, RegisteredPlatform, SiteHandler, WatchError,
    WatchPolicy,
};
