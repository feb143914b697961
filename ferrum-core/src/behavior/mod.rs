//! Block behaviours and the registry that resolves them.
//!
//! A [`Block`] is a transient value read fresh from chunk storage on every
//! access. Its behaviour is looked up through a [`BlockRegistry`] each time.

pub mod blocks;
mod registry;

use ferrum_utils::BlockPos;

pub use registry::BehaviorRegistry;

use crate::world::World;

/// The reserved id of air. Air never reacts to physics.
pub const AIR_ID: u16 = 0;
/// Highest block id that fits the packed `id << 4 | metadata` state.
pub const MAX_BLOCK_ID: u16 = 0x0FFF;
/// Highest metadata value that fits the packed state.
pub const MAX_METADATA: u8 = 0x0F;

/// A block as currently stored in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Block id.
    pub id: u16,
    /// Variant bits, `0..=15`.
    pub metadata: u8,
    /// Where the block was read from.
    pub pos: BlockPos,
}

impl Block {
    /// Whether this is the air sentinel.
    #[must_use]
    pub const fn is_air(&self) -> bool {
        self.id == AIR_ID
    }
}

/// Whether `id` and `metadata` can be stored as one packed block state.
#[must_use]
pub const fn is_valid_state(id: u16, metadata: u8) -> bool {
    id <= MAX_BLOCK_ID && metadata <= MAX_METADATA
}

/// Game logic attached to a block id.
///
/// Both callbacks may read and write blocks, schedule ticks and trigger
/// further physics through `world`.
pub trait BlockBehavior: Send + Sync {
    /// Called when a scheduled tick for `block` comes due.
    fn on_tick(&self, _world: &World, _block: &Block) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called when one of the six neighbours of `block` changed.
    fn on_physics_notify(&self, _world: &World, _block: &Block) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Resolves `(id, metadata)` to a behaviour.
pub trait BlockRegistry: Send + Sync {
    fn resolve(&self, id: u16, metadata: u8) -> &dyn BlockBehavior;
}

/// Behaviour of blocks without game logic.
pub struct InertBlock;

impl BlockBehavior for InertBlock {}
