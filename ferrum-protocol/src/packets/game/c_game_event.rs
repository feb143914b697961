use std::io::{Result, Write};

use ferrum_utils::serial::WriteTo;

use crate::{packet_ids::play::C_GAME_EVENT, packet_traits::ClientPacket};

/// Kinds of game state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GameEventType {
    /// No bed to respawn at.
    NoRespawnBlockAvailable = 0,
    /// Rain stops.
    EndRaining = 1,
    /// Rain starts.
    BeginRaining = 2,
    /// The player's game mode changed.
    ChangeGameMode = 3,
}

/// A game state change. `param` is event specific, rain intensity for weather.
#[derive(Debug, Clone, Copy)]
pub struct CGameEvent {
    /// What happened
    pub event: GameEventType,
    /// Event specific value
    pub param: f32,
}

impl CGameEvent {
    /// Starts or stops rain at full intensity.
    #[must_use]
    pub const fn rain(raining: bool) -> Self {
        Self {
            event: if raining {
                GameEventType::BeginRaining
            } else {
                GameEventType::EndRaining
            },
            param: 1.0,
        }
    }
}

impl WriteTo for CGameEvent {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        (self.event as u8).write(writer)?;
        self.param.write(writer)
    }
}

impl ClientPacket for CGameEvent {
    const PACKET_ID: i32 = C_GAME_EVENT;
}
