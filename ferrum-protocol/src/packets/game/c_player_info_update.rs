use std::io::{Result, Write};

use ferrum_utils::{
    codec::VarInt,
    serial::{PrefixedWrite, WriteTo},
};
use uuid::Uuid;

use crate::{packet_ids::play::C_PLAYER_INFO_UPDATE, packet_traits::ClientPacket};

/// What a player list update does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlayerInfoAction {
    /// Adds entries.
    AddPlayer = 0,
    /// Removes entries.
    RemovePlayer = 4,
}

/// One row of the player list.
#[derive(Debug, Clone)]
pub struct PlayerInfoEntry {
    /// The player's UUID
    pub uuid: Uuid,
    /// The player's name
    pub name: String,
    /// Game mode id
    pub game_mode: i32,
    /// Latency in milliseconds
    pub latency: i32,
    /// JSON text component shown instead of `name` in the tab list.
    pub display_name: Option<String>,
}

/// Adds players to, or removes them from, the tab list.
#[derive(Debug, Clone)]
pub struct CPlayerInfoUpdate {
    /// What to do with the entries
    pub action: PlayerInfoAction,
    /// The affected players
    pub entries: Vec<PlayerInfoEntry>,
}

impl CPlayerInfoUpdate {
    /// Adds one player to the list.
    #[must_use]
    pub fn add_player(entry: PlayerInfoEntry) -> Self {
        Self {
            action: PlayerInfoAction::AddPlayer,
            entries: vec![entry],
        }
    }

    /// Only the uuid is written for a removal.
    #[must_use]
    pub fn remove_player(uuid: Uuid) -> Self {
        Self {
            action: PlayerInfoAction::RemovePlayer,
            entries: vec![PlayerInfoEntry {
                uuid,
                name: String::new(),
                game_mode: 0,
                latency: 0,
                display_name: None,
            }],
        }
    }
}

impl WriteTo for CPlayerInfoUpdate {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        VarInt(self.action as i32).write(writer)?;
        VarInt(self.entries.len() as i32).write(writer)?;

        for entry in &self.entries {
            entry.uuid.write(writer)?;

            if self.action == PlayerInfoAction::AddPlayer {
                entry.name.write_prefixed::<VarInt>(writer)?;
                // No profile properties
                VarInt(0).write(writer)?;
                VarInt(entry.game_mode).write(writer)?;
                VarInt(entry.latency).write(writer)?;
                entry.display_name.write(writer)?;
            }
        }

        Ok(())
    }
}

impl ClientPacket for CPlayerInfoUpdate {
    const PACKET_ID: i32 = C_PLAYER_INFO_UPDATE;
}
