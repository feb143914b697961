//! Liquid block behaviour (water, lava).

use ferrum_utils::{Direction, UpdateFlags};

use super::{FLOWING_LAVA, FLOWING_WATER};
use crate::{
    behavior::{Block, BlockBehavior},
    chunk::MIN_Y,
    world::World,
};

/// Flowing blocks at this level do not spread sideways.
const MAX_LEVEL: u8 = 7;

/// Spreads into air below, or sideways when blocked.
///
/// A neighbour change schedules a tick instead of spreading right away, so
/// a chain of updates settles one step per delay.
pub struct LiquidBlock {
    flowing_id: u16,
    tick_delay: u64,
}

impl LiquidBlock {
    /// Still and flowing water.
    #[must_use]
    pub const fn water() -> Self {
        Self {
            flowing_id: FLOWING_WATER,
            tick_delay: 5,
        }
    }

    /// Still and flowing lava. Slower than water.
    #[must_use]
    pub const fn lava() -> Self {
        Self {
            flowing_id: FLOWING_LAVA,
            tick_delay: 30,
        }
    }

    fn flow_into(&self, world: &World, target: Block, level: u8) -> anyhow::Result<()> {
        world.set_block(target.pos, self.flowing_id, level, UpdateFlags::UPDATE_ALL)?;
        world.schedule_block_tick(target.pos, self.tick_delay);
        Ok(())
    }
}

impl BlockBehavior for LiquidBlock {
    fn on_tick(&self, world: &World, block: &Block) -> anyhow::Result<()> {
        let below = Direction::Down.relative(block.pos);
        if below.y() >= MIN_Y {
            let target = world.get_block(below)?;
            if target.is_air() {
                return self.flow_into(world, target, block.metadata);
            }
        }

        if block.metadata >= MAX_LEVEL {
            return Ok(());
        }
        let level = block.metadata + 1;
        for dir in [
            Direction::West,
            Direction::East,
            Direction::North,
            Direction::South,
        ] {
            let target = world.get_block(dir.relative(block.pos))?;
            if target.is_air() {
                self.flow_into(world, target, level)?;
            }
        }
        Ok(())
    }

    fn on_physics_notify(&self, world: &World, block: &Block) -> anyhow::Result<()> {
        world.schedule_block_tick(block.pos, self.tick_delay);
        Ok(())
    }
}
