//! # Ferrum
//!
//! Hosts a single world and drives its tick loop until shutdown.

use std::{sync::Arc, time::Duration};

use ferrum_core::{
    behavior::BehaviorRegistry,
    chunk::ram_only::RamOnlyChunkProvider,
    config::WorldConfig,
    scheduler::TickScheduler,
    world::World,
};
use tokio::{select, spawn};
use tokio_util::sync::CancellationToken;

/// The logging setup.
pub mod logger;

/// The main server struct.
pub struct FerrumServer {
    /// The cancellation token for graceful shutdown.
    pub cancel_token: CancellationToken,
    /// The hosted world.
    pub world: Arc<World>,
    scheduler: TickScheduler,
}

impl FerrumServer {
    /// Creates the world described by `config`. Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        log::info!("Starting Ferrum Server");

        let world = Arc::new(World::new(
            config,
            Arc::new(RamOnlyChunkProvider::empty_world()),
            Arc::new(BehaviorRegistry::vanilla()),
        ));
        let (scheduler, mut faults) =
            TickScheduler::new(world.clone(), Duration::from_millis(config.tick_interval_ms))
                .with_fault_channel();

        let cancel_token = CancellationToken::new();
        let fault_token = cancel_token.clone();
        spawn(async move {
            let mut total = 0u64;
            loop {
                select! {
                    () = fault_token.cancelled() => break,
                    fault = faults.recv() => {
                        let Some(fault) = fault else { break };
                        total += 1;
                        log::debug!("Fault #{total}: {} ({})", fault.source, fault.error);
                    }
                }
            }
        });

        Self {
            cancel_token,
            world,
            scheduler,
        }
    }

    /// Starts ticking the world.
    pub fn start(&self) -> anyhow::Result<()> {
        self.scheduler.start()?;
        log::info!(
            "Started Ferrum Server, spawn at {}",
            self.world.spawn_point()
        );
        Ok(())
    }

    /// Stops ticking and saves the world.
    pub async fn stop(&self) {
        self.cancel_token.cancel();
        self.scheduler.shutdown().await;
        if let Err(err) = self.world.save_chunks() {
            log::warn!("Final save of {} failed: {err}", self.world.level_name);
        }
    }
}
