//! Physics propagation: a changed block notifies its six neighbours.
//!
//! A neighbour's callback may write blocks itself, which notifies its own
//! neighbours in turn. Nothing detects cycles. The optional depth cap is the
//! only bound.

use std::cell::Cell;

use ferrum_utils::{BlockPos, Direction};

use super::World;

thread_local! {
    /// Nested `apply_physics` calls on this thread.
    static PHYSICS_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Restores the depth on drop, unwinding included.
struct DepthGuard(u32);

impl Drop for DepthGuard {
    fn drop(&mut self) {
        PHYSICS_DEPTH.set(self.0);
    }
}

impl World {
    /// Notifies the six neighbours of `pos`, in [`Direction::ALL`] order.
    pub fn apply_physics(&self, pos: BlockPos) {
        let outer = PHYSICS_DEPTH.get();
        if let Some(max) = self.max_physics_depth
            && outer >= max
        {
            log::warn!("Physics at {pos} dropped, nesting depth {max} reached");
            return;
        }
        PHYSICS_DEPTH.set(outer + 1);
        let _guard = DepthGuard(outer);

        for dir in Direction::ALL {
            self.notify(dir.relative(pos));
        }
    }

    /// Runs the physics callback of the block at `pos`. Air is skipped.
    pub fn notify(&self, pos: BlockPos) {
        let block = match self.get_block(pos) {
            Ok(block) => block,
            Err(err) => {
                log::warn!("Physics notify at {pos} skipped: {err}");
                return;
            }
        };
        if block.is_air() {
            return;
        }
        if let Err(err) = self
            .block_registry
            .resolve(block.id, block.metadata)
            .on_physics_notify(self, &block)
        {
            log::warn!("Physics callback of block {} at {pos} failed: {err:#}", block.id);
        }
    }
}
