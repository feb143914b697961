//! Server difficulty settings.

use serde::{Deserialize, Serialize};

/// The server difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Peaceful - no hostile mobs spawn, health regenerates.
    Peaceful = 0,
    /// Easy - hostile mobs deal less damage.
    Easy = 1,
    /// Normal - default difficulty.
    #[default]
    Normal = 2,
    /// Hard - hostile mobs deal more damage, can break doors.
    Hard = 3,
}

impl Difficulty {
    /// The numeric id sent to clients.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}
