//! Share Link Cleaner binary support: bootstrap, CLI definition and the
//! command handlers.

pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{clean_clipboard, clean_link, platform_lines, CommandError};
