//! ID type wrappers for type safety.

pub mod element_id;

pub use element_id::ElementId;
