//! Ferrum server entry point.

use std::path::Path;

use ferrum::{FerrumServer, logger};
use ferrum_core::config::WorldConfig;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const CONFIG_PATH: &str = "ferrum_config.json5";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init()?;

    let config = WorldConfig::load_or_create(Path::new(CONFIG_PATH))?;
    let server = FerrumServer::new(&config);
    server.start()?;

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");
    server.stop().await;
    Ok(())
}
