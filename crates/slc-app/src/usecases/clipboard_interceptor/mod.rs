//! Clipboard interception strategies.
//!
//! - [`override_copy`]: wrap the copy trigger so the link is cleaned before
//!   the platform copies it.
//! - [`post_copy`]: let the platform copy, then rewrite the clipboard.
//!
//! Clipboard access is best-effort in both: failures are logged and the
//! page keeps working.

pub mod override_copy;
pub mod post_copy;

pub use override_copy::{CopyOutcome, CopyOverride};
pub use post_copy::{rewrite_copied_link, PostCopyOutcome};
