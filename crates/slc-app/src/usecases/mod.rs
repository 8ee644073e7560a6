//! Business logic use cases
//!
//! [HandlerRegistry]            picks the platform for the page
//!         ↓
//! [SiteHandler]                drives the handler state machine
//!         ↓
//! [ElementWatcher]             waits for platform-rendered triggers
//!         ↓
//! [clipboard_interceptor]      override copy / post-copy rewrite

pub mod clipboard_interceptor;
pub mod element_watcher;
pub mod registry;
pub mod site_handler;

pub use element_watcher::{ElementWatcher, WatchError, WatchPolicy};
pub use registry::{HandlerRegistry, RegisteredPlatform, RegistryError};
pub use site_handler::{PageHost, SiteHandler};
