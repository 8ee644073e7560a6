use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::{bail, Result};
use async_trait::async_trait;
use slc_core::ports::ClipboardTextPort;

/// Clipboard held in memory.
///
/// `set_text` plays the role of a native page writing the clipboard; the
/// port methods are what the handlers see. Reads and writes can be made to
/// fail to exercise the permission-denied paths.
#[derive(Default)]
pub struct InMemoryClipboard {
    text: Mutex<String>,
    writes: AtomicUsize,
    deny_read: AtomicBool,
    deny_write: AtomicBool,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let clipboard = Self::default();
        clipboard.set_text(text);
        clipboard
    }

    /// Write without going through the port (native copy).
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful writes through the port.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn deny_read(&self, deny: bool) {
        self.deny_read.store(deny, Ordering::SeqCst);
    }

    pub fn deny_write(&self, deny: bool) {
        self.deny_write.store(deny, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClipboardTextPort for InMemoryClipboard {
    async fn read_text(&self) -> Result<String> {
        if self.deny_read.load(Ordering::SeqCst) {
            bail!("clipboard read permission denied");
        }
        Ok(self.text())
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        if self.deny_write.load(Ordering::SeqCst) {
            bail!("clipboard write permission denied");
        }
        self.set_text(text);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
