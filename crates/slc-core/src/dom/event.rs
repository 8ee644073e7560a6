use std::sync::Arc;

/// Page events the handlers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Click,
    MouseEnter,
}

impl DomEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomEvent::Click => "click",
            DomEvent::MouseEnter => "mouseenter",
        }
    }
}

/// Whether a listener detaches after its first invocation.
///
/// Some platforms re-show the share trigger on every interaction and need a
/// persistent listener; others only need the first activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenMode {
    Once,
    Persistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub once: bool,
}

impl From<ListenMode> for ListenerOptions {
    fn from(mode: ListenMode) -> Self {
        Self {
            once: mode == ListenMode::Once,
        }
    }
}

/// Callback registered through `addEventListener`.
pub type EventListener = Arc<dyn Fn() + Send + Sync>;

/// Callback stored in an element's `onclick` slot.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;
