//! One pass of the world simulation.

use std::{
    any::Any,
    fmt::{self, Display},
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use ferrum_utils::BlockPos;

use super::World;
use crate::player::Player;

/// Whose callback failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultSource {
    /// A player tick failed.
    Player {
        /// The player's entity id.
        entity_id: i32,
        /// The player's name.
        name: String,
    },
    /// An entity tick failed.
    Entity {
        /// The entity's id.
        entity_id: i32,
    },
    /// A scheduled block tick failed.
    Block {
        /// Where the block sits.
        pos: BlockPos,
    },
}

impl Display for FaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { entity_id, name } => write!(f, "player {name} ({entity_id})"),
            Self::Entity { entity_id } => write!(f, "entity {entity_id}"),
            Self::Block { pos } => write!(f, "block tick at {pos}"),
        }
    }
}

/// A tick callback that returned an error or panicked. The rest of the tick ran anyway.
#[derive(Debug, Clone)]
pub struct ActorFault {
    /// Whose callback failed.
    pub source: FaultSource,
    /// The error or panic message.
    pub error: String,
}

/// What happened during one call to [`World::tick`].
#[derive(Debug, Clone)]
pub struct TickReport {
    /// World age after the tick.
    pub game_time: u64,
    /// Wall-clock time the tick took.
    pub elapsed: Duration,
    /// Block ticks fired.
    pub block_ticks: usize,
    /// Callbacks that failed.
    pub faults: Vec<ActorFault>,
    /// Whether maintenance saved chunks this tick.
    pub saved: bool,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}

/// Runs one callback, turning an error or a panic into a logged fault.
fn isolate(source: FaultSource, f: impl FnOnce() -> anyhow::Result<()>) -> Option<ActorFault> {
    let error = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => return None,
        Ok(Err(err)) => format!("{err:#}"),
        Err(payload) => panic_message(&*payload),
    };
    log::warn!("Tick of {source} failed: {error}");
    Some(ActorFault { source, error })
}

impl World {
    /// Runs one full tick: day, weather, due block ticks, players then
    /// entities, and periodic maintenance.
    ///
    /// A failing callback is logged and skipped; it never stops the tick.
    pub fn tick(&self) -> TickReport {
        let start = Instant::now();

        self.day_tick();
        self.weather_tick();
        let (block_ticks, mut faults) = self.tick_block_events();
        faults.extend(self.tick_actors());
        let saved = self.maintenance();

        let elapsed = start.elapsed();
        let mut tick_rate = self.tick_rate.lock();
        if tick_rate.record(elapsed) {
            log::debug!(
                "Tick of {} took {:?}, over the {:?} target",
                self.level_name,
                elapsed,
                tick_rate.target_interval()
            );
        }
        drop(tick_rate);

        TickReport {
            game_time: self.game_time(),
            elapsed,
            block_ticks,
            faults,
            saved,
        }
    }

    /// Fires every block tick that is due. Returns how many fired and the faults.
    pub fn tick_block_events(&self) -> (usize, Vec<ActorFault>) {
        let due = self.block_ticks.drain_due(self.game_time());
        let faults: Vec<ActorFault> = due
            .iter()
            .filter_map(|&pos| {
                isolate(FaultSource::Block { pos }, || {
                    let block = self.get_block(pos)?;
                    self.block_registry
                        .resolve(block.id, block.metadata)
                        .on_tick(self, &block)
                })
            })
            .collect();
        (due.len(), faults)
    }

    /// Ticks every online player, then every entity, each over a snapshot.
    pub fn tick_actors(&self) -> Vec<ActorFault> {
        let mut faults = Vec::new();
        for player in self.online_players() {
            let source = FaultSource::Player {
                entity_id: player.entity_id,
                name: player.username.clone(),
            };
            faults.extend(isolate(source, || player.tick()));
        }
        for entity in self.entities() {
            let source = FaultSource::Entity {
                entity_id: entity.entity_id(),
            };
            faults.extend(isolate(source, || entity.tick(self)));
        }
        faults
    }

    /// Saves chunks every `save_interval_ticks`. Returns true if a save ran.
    ///
    /// A failed save is logged and the world keeps ticking.
    pub fn maintenance(&self) -> bool {
        if self.game_time() % self.save_interval_ticks != 0 {
            return false;
        }
        if let Err(err) = self.save_chunks() {
            log::warn!("Saving {} failed: {err}", self.level_name);
        }
        true
    }

    /// Sends `player` the tick rate and the duration of the last tick.
    pub fn send_tps_report(&self, player: &Player) {
        let (tps, millis) = {
            let tick_rate = self.tick_rate.lock();
            (tick_rate.tps_display(), tick_rate.last_tick_millis())
        };
        player.send_chat(&format!("TPS: {tps}"));
        player.send_chat(&format!("Milliseconds in Tick: {millis}ms"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_becomes_fault() {
        let fault = isolate(FaultSource::Entity { entity_id: 3 }, || {
            Err(anyhow::anyhow!("stuck"))
        })
        .expect("fault");
        assert_eq!(fault.source, FaultSource::Entity { entity_id: 3 });
        assert_eq!(fault.error, "stuck");
    }

    #[test]
    fn test_panic_becomes_fault() {
        let fault = isolate(FaultSource::Entity { entity_id: 4 }, || panic!("boom"))
            .expect("fault");
        assert_eq!(fault.error, "boom");
        assert!(isolate(FaultSource::Entity { entity_id: 5 }, || Ok(())).is_none());
    }
}
