//! This module contains the `World` struct, the authoritative state of one level.
//!
//! The world is shared between the tick driver and network tasks. Every field
//! carries its own synchronization so callers only ever need `&World`.

mod physics;
mod tick;
mod time;
mod weather;
mod world_entities;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use ferrum_protocol::packets::game::CBlockUpdate;
use ferrum_utils::{BlockPos, UpdateFlags};
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use thiserror::Error;

pub use tick::{ActorFault, FaultSource, TickReport};

use crate::{
    behavior::{Block, BlockRegistry, is_valid_state},
    chunk::{ChunkError, ChunkProvider},
    config::WorldConfig,
    difficulty::Difficulty,
    entity::Entity,
    game_mode::GameMode,
    level_type::LevelType,
    player::Player,
    tick_rate::TickRateManager,
    ticks::BlockTickQueue,
};
use time::WorldClock;
use weather::Weather;

/// An error raised by world operations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// `start` was called on a scheduler that is already running.
    #[error("tick scheduler for {0} is already running")]
    SchedulerAlreadyStarted(String),
    /// `start` was called after shutdown.
    #[error("tick scheduler for {0} has been stopped")]
    SchedulerStopped(String),
    /// A player or entity with this id is already in the world.
    #[error("entity id {0} is already in use")]
    DuplicateEntityId(i32),
    /// Chunk storage failed.
    #[error(transparent)]
    Chunk(#[from] ChunkError),
}

/// A struct that represents a world.
pub struct World {
    /// The level name.
    pub level_name: String,
    /// The dimension id.
    pub dimension: i8,
    /// The difficulty.
    pub difficulty: Difficulty,
    /// The game mode new players start in.
    pub default_game_mode: GameMode,
    /// The generator preset.
    pub level_type: LevelType,

    chunk_provider: Arc<dyn ChunkProvider>,
    block_registry: Arc<dyn BlockRegistry>,

    clock: Mutex<WorldClock>,
    weather: Mutex<Weather>,
    block_ticks: BlockTickQueue,

    /// Connected players. Every add, remove and snapshot goes through this lock.
    players: Mutex<Vec<Arc<Player>>>,
    entities: Mutex<Vec<Arc<dyn Entity>>>,

    tick_rate: Mutex<TickRateManager>,
    save_interval_ticks: u64,
    max_physics_depth: Option<u32>,
}

impl World {
    /// Creates a new world.
    ///
    /// Weather is seeded from `config.weather_seed`, or from the OS when unset.
    #[must_use]
    pub fn new(
        config: &WorldConfig,
        chunk_provider: Arc<dyn ChunkProvider>,
        block_registry: Arc<dyn BlockRegistry>,
    ) -> Self {
        let rng: Box<dyn RngCore + Send> = match config.weather_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        };
        Self::with_rng(config, chunk_provider, block_registry, rng)
    }

    /// Creates a new world whose weather draws from `rng`.
    #[must_use]
    pub fn with_rng(
        config: &WorldConfig,
        chunk_provider: Arc<dyn ChunkProvider>,
        block_registry: Arc<dyn BlockRegistry>,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        log::info!(
            "Loading world {} (dimension {}, difficulty {}, level type {})",
            config.level_name,
            config.dimension,
            config.difficulty.id(),
            config.level_type.name()
        );
        Self {
            level_name: config.level_name.clone(),
            dimension: config.dimension,
            difficulty: config.difficulty,
            default_game_mode: config.default_gamemode,
            level_type: config.level_type,
            chunk_provider,
            block_registry,
            clock: Mutex::new(WorldClock::new(config.initial_world_time)),
            weather: Mutex::new(Weather::new(rng)),
            block_ticks: BlockTickQueue::new(),
            players: Mutex::new(Vec::new()),
            entities: Mutex::new(Vec::new()),
            tick_rate: Mutex::new(TickRateManager::new(Duration::from_millis(
                config.tick_interval_ms,
            ))),
            save_interval_ticks: config.save_interval_ticks.max(1),
            max_physics_depth: config.max_physics_depth,
        }
    }

    /// Reads the block at `pos` from chunk storage.
    pub fn get_block(&self, pos: BlockPos) -> Result<Block, ChunkError> {
        let column = self.chunk_provider.column_for(pos.chunk_pos())?;
        let (x, z) = pos.local_xz();
        Ok(Block {
            id: column.block_id(x, pos.y(), z),
            metadata: column.metadata(x, pos.y(), z),
            pos,
        })
    }

    /// Writes a block and marks its column dirty.
    ///
    /// `UPDATE_CLIENTS` broadcasts the change, then `UPDATE_NEIGHBORS` runs
    /// physics on the six neighbours. States that do not fit the packed
    /// `id << 4 | metadata` storage are rejected with
    /// [`ChunkError::InvalidState`] and nothing is written.
    pub fn set_block(
        &self,
        pos: BlockPos,
        id: u16,
        metadata: u8,
        flags: UpdateFlags,
    ) -> Result<(), ChunkError> {
        if !is_valid_state(id, metadata) {
            return Err(ChunkError::InvalidState { pos, id, metadata });
        }
        let column = self.chunk_provider.column_for(pos.chunk_pos())?;
        let (x, z) = pos.local_xz();
        column.set_block(x, pos.y(), z, id, metadata);
        column.mark_dirty();

        if flags.contains(UpdateFlags::UPDATE_CLIENTS) {
            self.broadcast(&CBlockUpdate {
                pos,
                block_id: id,
                metadata,
            });
        }
        if flags.contains(UpdateFlags::UPDATE_NEIGHBORS) {
            self.apply_physics(pos);
        }
        Ok(())
    }

    /// Queues a tick for the block at `pos`, `delay` ticks from now.
    ///
    /// Replaces any tick already pending for `pos`.
    pub fn schedule_block_tick(&self, pos: BlockPos, delay: u64) {
        let due = self.game_time() + delay;
        self.block_ticks.schedule(pos, due);
    }

    /// The game tick a block tick at `pos` is pending for.
    #[must_use]
    pub fn pending_block_tick(&self, pos: BlockPos) -> Option<u64> {
        self.block_ticks.due_at(pos)
    }

    /// Number of pending block ticks.
    #[must_use]
    pub fn pending_block_ticks(&self) -> usize {
        self.block_ticks.len()
    }

    /// Where players appear when they join.
    #[must_use]
    pub fn spawn_point(&self) -> BlockPos {
        self.chunk_provider.spawn_point()
    }

    /// Saves every dirty chunk now.
    pub fn save_chunks(&self) -> Result<(), ChunkError> {
        log::info!("Saving chunks");
        let start = Instant::now();
        let result = self.chunk_provider.save_all(&self.level_name);
        log::info!("Saving chunks took: {}ms", start.elapsed().as_millis());
        result
    }
}
