//! Player game modes.

use serde::{Deserialize, Serialize};

/// How a player interacts with the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Breaks blocks over time, takes damage.
    #[default]
    Survival = 0,
    /// Unlimited blocks, no damage, can fly.
    Creative = 1,
    /// Cannot break or place blocks freely.
    Adventure = 2,
    /// Invisible, flies through blocks.
    Spectator = 3,
}

impl GameMode {
    /// The numeric id sent in player list entries.
    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }
}
