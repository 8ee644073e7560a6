use clap::Parser;
use share_link_cleaner_lib::bootstrap::{init_tracing_subscriber, resolve_config};
use share_link_cleaner_lib::{commands, Cli};
use slc_app::HandlerRegistry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing_subscriber()?;

    let config = resolve_config(cli.config.as_deref())?;
    let registry = HandlerRegistry::from_config(&config)?;

    commands::run(cli.command, &registry).await
}
