//! Items a player holds and wears, as other players see them.

use std::mem;

use ferrum_protocol::packets::game::{CSetEquipment, EquipmentSlot, SlotData};

/// What a player holds and wears.
#[derive(Debug, Clone, Default)]
pub struct PlayerEquipment {
    slots: [SlotData; EquipmentSlot::ALL.len()],
}

impl PlayerEquipment {
    /// Creates empty equipment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item in a slot, returning the previous item.
    pub fn set(&mut self, slot: EquipmentSlot, item: SlotData) -> SlotData {
        mem::replace(&mut self.slots[slot.index()], item)
    }

    /// The item in `slot`.
    #[must_use]
    pub fn get(&self, slot: EquipmentSlot) -> SlotData {
        self.slots[slot.index()]
    }

    /// Equipment packets for every occupied slot of `entity_id`.
    #[must_use]
    pub fn sync_packets(&self, entity_id: i32) -> Vec<CSetEquipment> {
        EquipmentSlot::ALL
            .into_iter()
            .filter(|slot| !self.get(*slot).is_empty())
            .map(|slot| CSetEquipment {
                entity_id,
                slot,
                item: self.get(slot),
            })
            .collect()
    }
}
