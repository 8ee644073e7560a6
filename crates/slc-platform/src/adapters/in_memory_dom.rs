//! In-process page model implementing [`DomPort`].
//!
//! Stands in for a browser page when driving the handlers from tests or from
//! an embedder that mirrors page state itself. Elements can be inserted,
//! re-rendered and removed at any time; clicks and hovers dispatch to the
//! `onclick` slot first, then to listeners in registration order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Result};
use slc_core::dom::{ClickHandler, DomEvent, ElementHandle, EventListener, ListenerOptions};
use slc_core::ids::ElementId;
use slc_core::ports::DomPort;

struct Registered {
    event: DomEvent,
    listener: EventListener,
    once: bool,
}

struct Node {
    handle: ElementHandle,
    listeners: Vec<Registered>,
    onclick: Option<ClickHandler>,
    value: Option<String>,
}

#[derive(Default)]
struct DomInner {
    next_node: u64,
    nodes: HashMap<ElementId, Node>,
}

impl DomInner {
    fn attached(&mut self, element: &ElementHandle) -> Result<&mut Node> {
        self.nodes
            .get_mut(element.id())
            .filter(|node| node.handle == *element)
            .ok_or_else(|| anyhow!("element {} is no longer attached", element.id()))
    }
}

#[derive(Default)]
pub struct InMemoryDom {
    inner: Mutex<DomInner>,
    operations: AtomicUsize,
}

impl InMemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DomInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn count_operation(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }

    /// Render an element. Re-rendering an existing id replaces the node,
    /// dropping its listeners and issuing a new handle.
    pub fn insert_element(&self, id: impl Into<ElementId>) -> ElementHandle {
        self.insert(id.into(), None)
    }

    /// Render an input element holding `value`.
    pub fn insert_input(&self, id: impl Into<ElementId>, value: impl Into<String>) -> ElementHandle {
        self.insert(id.into(), Some(value.into()))
    }

    fn insert(&self, id: ElementId, value: Option<String>) -> ElementHandle {
        let mut inner = self.lock();
        inner.next_node += 1;
        let handle = ElementHandle::new(id.clone(), inner.next_node);
        inner.nodes.insert(
            id,
            Node {
                handle: handle.clone(),
                listeners: Vec::new(),
                onclick: None,
                value,
            },
        );
        handle
    }

    /// Take an element off the page. Handles to it become stale.
    pub fn remove_element(&self, id: impl Into<ElementId>) -> bool {
        self.lock().nodes.remove(&id.into()).is_some()
    }

    /// Simulate a user click. Returns `false` when the element is absent.
    pub fn click(&self, id: impl Into<ElementId>) -> bool {
        self.dispatch(&id.into(), DomEvent::Click)
    }

    /// Simulate the pointer entering the element.
    pub fn hover(&self, id: impl Into<ElementId>) -> bool {
        self.dispatch(&id.into(), DomEvent::MouseEnter)
    }

    fn dispatch(&self, id: &ElementId, event: DomEvent) -> bool {
        // Callbacks run without the lock held: they are free to call back
        // into the page.
        let callbacks: Vec<EventListener> = {
            let mut inner = self.lock();
            let Some(node) = inner.nodes.get_mut(id) else {
                return false;
            };

            let mut callbacks = Vec::new();
            if event == DomEvent::Click {
                if let Some(onclick) = &node.onclick {
                    callbacks.push(onclick.clone());
                }
            }
            node.listeners.retain(|registered| {
                if registered.event != event {
                    return true;
                }
                callbacks.push(registered.listener.clone());
                !registered.once
            });
            callbacks
        };

        for callback in callbacks {
            callback();
        }
        true
    }

    pub fn value_of(&self, id: impl Into<ElementId>) -> Option<String> {
        self.lock()
            .nodes
            .get(&id.into())
            .and_then(|node| node.value.clone())
    }

    pub fn listener_count(&self, id: impl Into<ElementId>, event: DomEvent) -> usize {
        self.lock()
            .nodes
            .get(&id.into())
            .map(|node| node.listeners.iter().filter(|l| l.event == event).count())
            .unwrap_or(0)
    }

    pub fn has_click_handler(&self, id: impl Into<ElementId>) -> bool {
        self.lock()
            .nodes
            .get(&id.into())
            .is_some_and(|node| node.onclick.is_some())
    }

    /// Install a page-owned `onclick` handler, as the platform's own script
    /// would.
    pub fn set_native_click_handler(&self, id: impl Into<ElementId>, handler: ClickHandler) -> bool {
        match self.lock().nodes.get_mut(&id.into()) {
            Some(node) => {
                node.onclick = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Register a page-owned listener ahead of any handler listeners.
    pub fn add_native_listener(
        &self,
        id: impl Into<ElementId>,
        event: DomEvent,
        listener: EventListener,
    ) -> bool {
        match self.lock().nodes.get_mut(&id.into()) {
            Some(node) => {
                node.listeners.push(Registered {
                    event,
                    listener,
                    once: false,
                });
                true
            }
            None => false,
        }
    }

    /// Number of [`DomPort`] calls served so far.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }
}

impl DomPort for InMemoryDom {
    fn get_element_by_id(&self, id: &ElementId) -> Option<ElementHandle> {
        self.count_operation();
        self.lock().nodes.get(id).map(|node| node.handle.clone())
    }

    fn add_event_listener(
        &self,
        element: &ElementHandle,
        event: DomEvent,
        listener: EventListener,
        options: ListenerOptions,
    ) -> Result<()> {
        self.count_operation();
        let mut inner = self.lock();
        inner.attached(element)?.listeners.push(Registered {
            event,
            listener,
            once: options.once,
        });
        Ok(())
    }

    fn click_handler(&self, element: &ElementHandle) -> Option<ClickHandler> {
        self.count_operation();
        let mut inner = self.lock();
        inner
            .attached(element)
            .ok()
            .and_then(|node| node.onclick.clone())
    }

    fn set_click_handler(&self, element: &ElementHandle, handler: ClickHandler) -> Result<()> {
        self.count_operation();
        let mut inner = self.lock();
        inner.attached(element)?.onclick = Some(handler);
        Ok(())
    }

    fn input_value(&self, id: &ElementId) -> Option<String> {
        self.count_operation();
        self.lock().nodes.get(id).and_then(|node| node.value.clone())
    }

    fn set_input_value(&self, id: &ElementId, value: &str) -> Result<()> {
        self.count_operation();
        let mut inner = self.lock();
        let node = inner
            .nodes
            .get_mut(id)
            .ok_or_else(|| anyhow!("input {} not found", id))?;
        node.value = Some(value.to_string());
        Ok(())
    }
}
