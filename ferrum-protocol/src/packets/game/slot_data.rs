//! Network slot data for equipment packets.

use std::io::{Result, Write};

use ferrum_utils::serial::WriteTo;

/// A slot's contents for network transmission.
///
/// Serialized as an `i16` item id, `-1` for an empty slot. A present item is
/// followed by its count (`u8`), damage (`i16`) and an empty NBT tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotData {
    /// The item id, `None` for an empty slot.
    pub item_id: Option<i16>,
    /// The item count.
    pub count: u8,
    /// Damage or variant value.
    pub damage: i16,
}

impl SlotData {
    /// Creates an empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item_id: None,
            count: 0,
            damage: 0,
        }
    }

    /// Creates a slot with an item.
    #[must_use]
    pub const fn new(item_id: i16, count: u8, damage: i16) -> Self {
        Self {
            item_id: Some(item_id),
            count,
            damage,
        }
    }

    /// Returns true if this slot is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_id.is_none() || self.count == 0
    }
}

impl WriteTo for SlotData {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        match self.item_id {
            Some(id) if self.count > 0 => {
                id.write(writer)?;
                self.count.write(writer)?;
                self.damage.write(writer)?;
                // TAG_End, no NBT
                0u8.write(writer)
            }
            _ => (-1i16).write(writer),
        }
    }
}
