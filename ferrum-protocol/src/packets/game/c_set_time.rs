use std::io::{Result, Write};

use ferrum_utils::serial::WriteTo;

use crate::{packet_ids::play::C_SET_TIME, packet_traits::ClientPacket};

/// Syncs the world clock.
///
/// The first field is the client's world age slot; the server fills it with
/// the day counter.
#[derive(Debug, Clone, Copy)]
pub struct CSetTime {
    /// Days passed, sent in the world age slot
    pub day: i64,
    /// Ticks into the current day
    pub time_of_day: i64,
}

impl WriteTo for CSetTime {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.day.write(writer)?;
        self.time_of_day.write(writer)
    }
}

impl ClientPacket for CSetTime {
    const PACKET_ID: i32 = C_SET_TIME;
}
