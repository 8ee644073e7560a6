//! Port interfaces for the application layer
//!
//! Ports define the contract between the handler use cases and whatever
//! host runs them (a browser bridge, a test page, a desktop shell). The
//! handlers never touch a concrete DOM or clipboard directly.

mod clipboard;
mod dom;

pub use clipboard::ClipboardTextPort;
pub use dom::DomPort;
