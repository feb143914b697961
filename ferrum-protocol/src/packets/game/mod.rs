//! Play state packets.
mod c_add_player;
mod c_block_update;
mod c_game_event;
mod c_player_info_update;
mod c_remove_entities;
mod c_set_equipment;
mod c_set_health;
mod c_set_time;
mod c_system_chat;
mod slot_data;

pub use c_add_player::CAddPlayer;
pub use c_block_update::CBlockUpdate;
pub use c_game_event::{CGameEvent, GameEventType};
pub use c_player_info_update::{CPlayerInfoUpdate, PlayerInfoEntry};
pub use c_remove_entities::CRemoveEntities;
pub use c_set_equipment::{CSetEquipment, EquipmentSlot};
pub use c_set_health::CSetHealth;
pub use c_set_time::CSetTime;
pub use c_system_chat::{CSystemChat, ChatPosition};
pub use slot_data::SlotData;
