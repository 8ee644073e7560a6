mod in_memory_clipboard;
mod in_memory_dom;
mod system_clipboard;

pub use in_memory_clipboard::InMemoryClipboard;
pub use in_memory_dom::InMemoryDom;
pub use system_clipboard::SystemClipboard;
