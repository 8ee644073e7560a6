//! Tracing configuration for Share Link Cleaner
//!
//! Logs go to stderr so stdout carries only command output (the cleaned
//! link), which keeps the binary usable in shell pipelines.

use std::io;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug level everywhere
/// - **Production**: info level, watcher polling noise kept at info
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        if is_dev {
            "slc_app=debug"
        } else {
            "slc_app=info"
        }
        .to_string(),
        if is_dev {
            "slc_platform=debug"
        } else {
            "slc_platform=info"
        }
        .to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// Respects `RUST_LOG`; falls back to [`build_filter_directives`].
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(build_filter_directives(is_development()).join(","))
    });

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    registry().with(env_filter).with(stderr_layer).try_init()?;

    Ok(())
}
