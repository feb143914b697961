use std::io::{Result, Write};

use ferrum_utils::{codec::VarInt, serial::WriteTo};

use super::SlotData;
use crate::{packet_ids::play::C_SET_EQUIPMENT, packet_traits::ClientPacket};

/// Equipment slots of a living entity, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum EquipmentSlot {
    /// Held item.
    MainHand = 0,
    /// Boots.
    Feet = 1,
    /// Leggings.
    Legs = 2,
    /// Chestplate.
    Chest = 3,
    /// Helmet.
    Head = 4,
}

impl EquipmentSlot {
    /// All slots in wire order.
    pub const ALL: [EquipmentSlot; 5] = [
        EquipmentSlot::MainHand,
        EquipmentSlot::Feet,
        EquipmentSlot::Legs,
        EquipmentSlot::Chest,
        EquipmentSlot::Head,
    ];

    /// Index into a per-entity slot array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Shows what an entity holds or wears.
#[derive(Debug, Clone, Copy)]
pub struct CSetEquipment {
    /// The equipped entity
    pub entity_id: i32,
    /// Which slot changed
    pub slot: EquipmentSlot,
    /// The new item
    pub item: SlotData,
}

impl WriteTo for CSetEquipment {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        VarInt(self.entity_id).write(writer)?;
        (self.slot as i16).write(writer)?;
        self.item.write(writer)
    }
}

impl ClientPacket for CSetEquipment {
    const PACKET_ID: i32 = C_SET_EQUIPMENT;
}
