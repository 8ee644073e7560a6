//! DOM port - abstracts the host page
//!
//! Element identifiers are platform-owned configuration; a missing element
//! is a normal, transient condition (`None`), not an error.

use anyhow::Result;

use crate::dom::{ClickHandler, DomEvent, ElementHandle, EventListener, ListenerOptions};
use crate::ids::ElementId;

pub trait DomPort: Send + Sync {
    /// Look up an element by id. `None` while the page has not rendered it.
    fn get_element_by_id(&self, id: &ElementId) -> Option<ElementHandle>;

    /// Register a listener, equivalent to `addEventListener`.
    ///
    /// Fails when the element has been detached since it was resolved.
    fn add_event_listener(
        &self,
        element: &ElementHandle,
        event: DomEvent,
        listener: EventListener,
        options: ListenerOptions,
    ) -> Result<()>;

    /// Current `onclick` handler of the element, if any.
    fn click_handler(&self, element: &ElementHandle) -> Option<ClickHandler>;

    /// Replace the element's `onclick` handler.
    fn set_click_handler(&self, element: &ElementHandle, handler: ClickHandler) -> Result<()>;

    /// Value of an input element looked up by id.
    fn input_value(&self, id: &ElementId) -> Option<String>;

    fn set_input_value(&self, id: &ElementId, value: &str) -> Result<()>;
}

#[cfg(test)]
mockall::mock! {
    pub Dom {}

    impl DomPort for Dom {
        fn get_element_by_id(&self, id: &ElementId) -> Option<ElementHandle>;
        fn add_event_listener(
            &self,
            element: &ElementHandle,
            event: DomEvent,
            listener: EventListener,
            options: ListenerOptions,
        ) -> Result<()>;
        fn click_handler(&self, element: &ElementHandle) -> Option<ClickHandler>;
        fn set_click_handler(&self, element: &ElementHandle, handler: ClickHandler) -> Result<()>;
        fn input_value(&self, id: &ElementId) -> Option<String>;
        fn set_input_value(&self, id: &ElementId, value: &str) -> Result<()>;
    }
}
