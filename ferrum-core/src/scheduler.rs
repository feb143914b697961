//! The fixed cadence driver of a world.
//!
//! `Idle → Running → Stopped`. A scheduler starts at most once; after
//! shutdown it stays stopped. An overrunning tick delays the ones after it:
//! no tick is ever skipped.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    select, spawn,
    sync::mpsc,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::world::{ActorFault, World, WorldError};

/// Lifecycle of a [`TickScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, not yet started.
    Idle,
    /// Ticking.
    Running,
    /// Shut down. Cannot be restarted.
    Stopped,
}

/// Drives [`World::tick`] on a tokio task.
pub struct TickScheduler {
    world: Arc<World>,
    interval: Duration,
    state: Mutex<SchedulerState>,
    cancel_token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
    faults: Option<mpsc::UnboundedSender<ActorFault>>,
}

impl TickScheduler {
    /// Creates an idle scheduler ticking `world` every `interval`.
    #[must_use]
    pub fn new(world: Arc<World>, interval: Duration) -> Self {
        Self {
            world,
            interval,
            state: Mutex::new(SchedulerState::Idle),
            cancel_token: CancellationToken::new(),
            handle: Mutex::new(None),
            faults: None,
        }
    }

    /// Forwards every actor fault to the returned receiver.
    #[must_use]
    pub fn with_fault_channel(mut self) -> (Self, mpsc::UnboundedReceiver<ActorFault>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.faults = Some(sender);
        (self, receiver)
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        *self.state.lock()
    }

    /// The world being ticked.
    #[must_use]
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// Spawns the tick task. Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), WorldError> {
        let mut state = self.state.lock();
        match *state {
            SchedulerState::Running => {
                return Err(WorldError::SchedulerAlreadyStarted(
                    self.world.level_name.clone(),
                ));
            }
            SchedulerState::Stopped => {
                return Err(WorldError::SchedulerStopped(self.world.level_name.clone()));
            }
            SchedulerState::Idle => {}
        }

        let span = tracing::info_span!("world", world = %self.world.level_name);
        let task = run(
            self.world.clone(),
            self.interval,
            self.cancel_token.clone(),
            self.faults.clone(),
        );
        *self.handle.lock() = Some(spawn(task.instrument(span)));
        *state = SchedulerState::Running;

        log::info!(
            "Ticking {} every {:?}",
            self.world.level_name,
            self.interval
        );
        Ok(())
    }

    /// Stops the tick task and waits for the tick in progress to finish.
    pub async fn shutdown(&self) {
        *self.state.lock() = SchedulerState::Stopped;
        self.cancel_token.cancel();

        let handle = self.handle.lock().take();
        if let Some(handle) = handle
            && let Err(err) = handle.await
        {
            log::warn!("Tick task of {} ended abnormally: {err}", self.world.level_name);
        }
    }
}

async fn run(
    world: Arc<World>,
    period: Duration,
    cancel_token: CancellationToken,
    faults: Option<mpsc::UnboundedSender<ActorFault>>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        select! {
            biased;
            () = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                let report = world.tick();
                if let Some(sender) = &faults {
                    for fault in report.faults {
                        sender.send(fault).ok();
                    }
                }
            }
        }
    }

    log::info!("Stopped ticking {}", world.level_name);
}
