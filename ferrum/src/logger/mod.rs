//! Log output for the server binary.
//!
//! Library crates log through the `log` facade. Those records are bridged into
//! `tracing` and printed by a `fmt` subscriber, filtered by `RUST_LOG`.

use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Call once, before anything logs.
pub fn init() -> anyhow::Result<()> {
    LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
