use std::io::{Result, Write};

use ferrum_utils::{codec::VarInt, serial::WriteTo};

use crate::{packet_ids::play::C_REMOVE_ENTITIES, packet_traits::ClientPacket};

/// Destroys entities on the client.
#[derive(Debug, Clone)]
pub struct CRemoveEntities {
    /// Entities to remove
    pub entity_ids: Vec<i32>,
}

impl CRemoveEntities {
    /// Removes one entity.
    #[must_use]
    pub fn single(entity_id: i32) -> Self {
        Self {
            entity_ids: vec![entity_id],
        }
    }
}

impl WriteTo for CRemoveEntities {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        VarInt(self.entity_ids.len() as i32).write(writer)?;
        for entity_id in &self.entity_ids {
            VarInt(*entity_id).write(writer)?;
        }
        Ok(())
    }
}

impl ClientPacket for CRemoveEntities {
    const PACKET_ID: i32 = C_REMOVE_ENTITIES;
}
