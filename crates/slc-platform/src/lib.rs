//! Host adapters for Share Link Cleaner.
//!
//! Implementations of the `slc-core` ports: an in-process page model, an
//! in-memory clipboard and the operating system clipboard.

pub mod adapters;
