//! Operating system clipboard via clipboard-rs.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};
use slc_core::ports::ClipboardTextPort;
use tokio::task::spawn_blocking;
use tracing::debug;

/// System clipboard text access. Backend calls block, so they run on the
/// blocking pool.
pub struct SystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create clipboard context: {}", e))?;
        debug!("System clipboard context created");
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl ClipboardTextPort for SystemClipboard {
    async fn read_text(&self) -> Result<String> {
        let inner = self.inner.clone();
        spawn_blocking(move || {
            let guard = inner
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to lock clipboard: {}", e))?;
            guard
                .get_text()
                .map_err(|e| anyhow::anyhow!("Failed to read text: {}", e))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let inner = self.inner.clone();
        let text = text.to_string();
        spawn_blocking(move || {
            let guard = inner
                .lock()
                .map_err(|e| anyhow::anyhow!("Failed to lock clipboard: {}", e))?;
            guard
                .set_text(text)
                .map_err(|e| anyhow::anyhow!("Failed to write text: {}", e))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
