//! World generator presets, as advertised to clients.

use serde::{Deserialize, Serialize};

/// The generator preset of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    /// Regular terrain.
    #[default]
    Default,
    /// Superflat.
    Flat,
    /// One of every block state.
    Debug,
}

impl LevelType {
    /// The name clients expect on join.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Flat => "flat",
            Self::Debug => "debug_all_block_states",
        }
    }
}
