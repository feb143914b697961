//! Non-player actors simulated by the world.

use crate::world::World;

/// An actor ticked once per world tick, after every player.
///
/// The world only keeps a shared handle; whoever spawned the entity owns its
/// state.
pub trait Entity: Send + Sync {
    /// Unique among entities and players of the same world.
    fn entity_id(&self) -> i32;

    /// Advances the entity by one tick.
    fn tick(&self, world: &World) -> anyhow::Result<()>;
}
