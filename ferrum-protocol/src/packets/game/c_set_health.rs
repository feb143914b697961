use std::io::{Result, Write};

use ferrum_utils::{codec::VarInt, serial::WriteTo};

use crate::{packet_ids::play::C_SET_HEALTH, packet_traits::ClientPacket};

/// Sent by the server to update the client's health, food, and saturation.
#[derive(Clone, Copy, Debug)]
pub struct CSetHealth {
    /// Health, 0 to 20
    pub health: f32,
    /// Food level, 0 to 20
    pub food: i32,
    /// Food saturation
    pub food_saturation: f32,
}

impl WriteTo for CSetHealth {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.health.write(writer)?;
        VarInt(self.food).write(writer)?;
        self.food_saturation.write(writer)
    }
}

impl ClientPacket for CSetHealth {
    const PACKET_ID: i32 = C_SET_HEALTH;
}
