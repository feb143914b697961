use std::io::{Result, Write};

use ferrum_utils::{BlockPos, codec::VarInt, serial::WriteTo};

use crate::{packet_ids::play::C_BLOCK_UPDATE, packet_traits::ClientPacket};

/// A single block change.
#[derive(Debug, Clone, Copy)]
pub struct CBlockUpdate {
    /// The changed block
    pub pos: BlockPos,
    /// New block id
    pub block_id: u16,
    /// New metadata
    pub metadata: u8,
}

impl CBlockUpdate {
    /// The combined state id, `id << 4 | metadata`.
    #[must_use]
    pub const fn state_id(&self) -> i32 {
        ((self.block_id as i32) << 4) | (self.metadata & 0x0F) as i32
    }
}

impl WriteTo for CBlockUpdate {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.pos.as_packed_i64().write(writer)?;
        VarInt(self.state_id()).write(writer)
    }
}

impl ClientPacket for CBlockUpdate {
    const PACKET_ID: i32 = C_BLOCK_UPDATE;
}
