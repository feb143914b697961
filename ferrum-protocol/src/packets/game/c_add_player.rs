//! Clientbound spawn of another player's entity.

use std::io::{Result, Write};

use ferrum_utils::{codec::VarInt, serial::WriteTo};
use uuid::Uuid;

use crate::{packet_ids::play::C_ADD_PLAYER, packet_traits::ClientPacket};

/// Terminates an entity metadata list.
const METADATA_END: u8 = 0x7F;

/// Spawns a player entity on the client.
#[derive(Debug, Clone)]
pub struct CAddPlayer {
    /// The entity's unique ID
    pub entity_id: i32,
    /// The player's UUID
    pub uuid: Uuid,
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Z position
    pub z: f64,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Item id in the main hand, 0 for none
    pub held_item: i16,
}

/// Positions are sent as 27.5 fixed point.
fn fixed_point(value: f64) -> i32 {
    (value * 32.0).floor() as i32
}

/// Angles are sent as 1/256ths of a full turn.
fn packed_angle(degrees: f32) -> i8 {
    (degrees * 256.0 / 360.0).rem_euclid(256.0) as u8 as i8
}

impl WriteTo for CAddPlayer {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        VarInt(self.entity_id).write(writer)?;
        self.uuid.write(writer)?;
        fixed_point(self.x).write(writer)?;
        fixed_point(self.y).write(writer)?;
        fixed_point(self.z).write(writer)?;
        packed_angle(self.yaw).write(writer)?;
        packed_angle(self.pitch).write(writer)?;
        self.held_item.write(writer)?;
        METADATA_END.write(writer)
    }
}

impl ClientPacket for CAddPlayer {
    const PACKET_ID: i32 = C_ADD_PLAYER;
}
