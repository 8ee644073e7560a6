//! DOM domain types shared by the ports and the handler state.

mod element;
mod event;

pub use element::ElementHandle;
pub use event::{ClickHandler, DomEvent, EventListener, ListenMode, ListenerOptions};
