//! Clipboard port - abstracts system clipboard text access
//!
//! Both operations are asynchronous on real hosts and may be rejected
//! (permission denied, document not focused). Callers treat every failure as
//! best-effort and never propagate it into the page.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ClipboardTextPort: Send + Sync {
    /// Read the current clipboard text.
    async fn read_text(&self) -> Result<String>;

    /// Replace the clipboard text.
    async fn write_text(&self, text: &str) -> Result<()>;
}
