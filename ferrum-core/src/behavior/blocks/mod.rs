//! Built-in block behaviours.

mod liquid_block;

pub use liquid_block::LiquidBlock;

/// Flowing water.
pub const FLOWING_WATER: u16 = 8;
/// Still water.
pub const WATER: u16 = 9;
/// Flowing lava.
pub const FLOWING_LAVA: u16 = 10;
/// Still lava.
pub const LAVA: u16 = 11;
