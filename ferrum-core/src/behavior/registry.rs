use rustc_hash::FxHashMap;

use super::{
    BlockBehavior, BlockRegistry, InertBlock,
    blocks::{self, LiquidBlock},
};

/// Registry for block behaviours, keyed by block id.
///
/// Ids without a registered behaviour resolve to [`InertBlock`].
pub struct BehaviorRegistry {
    behaviors: FxHashMap<u16, Box<dyn BlockBehavior>>,
}

impl BehaviorRegistry {
    /// Creates a registry where every id is inert.
    #[must_use]
    pub fn new() -> Self {
        Self {
            behaviors: FxHashMap::default(),
        }
    }

    /// Creates a registry with the built-in liquids assigned.
    #[must_use]
    pub fn vanilla() -> Self {
        let mut registry = Self::new();
        for id in [blocks::FLOWING_WATER, blocks::WATER] {
            registry.register(id, LiquidBlock::water());
        }
        for id in [blocks::FLOWING_LAVA, blocks::LAVA] {
            registry.register(id, LiquidBlock::lava());
        }
        registry
    }

    /// Assigns `behavior` to `id`, replacing any earlier assignment.
    pub fn register(&mut self, id: u16, behavior: impl BlockBehavior + 'static) {
        self.behaviors.insert(id, Box::new(behavior));
    }

    /// Whether `id` has a behaviour of its own.
    #[must_use]
    pub fn is_registered(&self, id: u16) -> bool {
        self.behaviors.contains_key(&id)
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry for BehaviorRegistry {
    fn resolve(&self, id: u16, _metadata: u8) -> &dyn BlockBehavior {
        match self.behaviors.get(&id) {
            Some(behavior) => behavior.as_ref(),
            None => &InertBlock,
        }
    }
}
