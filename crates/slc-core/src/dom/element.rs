use crate::ids::ElementId;

/// Host-issued reference to a resolved page element.
///
/// Two handles are equal only when they point at the same host node; an
/// element that was removed and re-rendered under the same id yields a new
/// handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: ElementId,
    node: u64,
}

impl ElementHandle {
    pub fn new(id: ElementId, node: u64) -> Self {
        Self { id, node }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Host node number backing this handle.
    pub fn node(&self) -> u64 {
        self.node
    }
}
