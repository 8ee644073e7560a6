use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strip tracking parameters from YouTube and Bilibili share links.
#[derive(Debug, Parser)]
#[command(name = "share-link-cleaner", version, about)]
pub struct Cli {
    /// Config file to use instead of the per-user default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the canonical form of a share link.
    Clean {
        url: String,
        /// Also put the cleaned link on the system clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Clean the link currently on the system clipboard.
    Clipboard,
    /// List registered platforms and their element ids.
    Platforms,
}
