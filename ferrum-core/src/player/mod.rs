//! This module contains all things player-related.
pub mod connection;
mod equipment;

use std::sync::Arc;

use ferrum_protocol::{
    ClientPacket, EncodedPacket,
    packets::game::{
        CAddPlayer, CSetEquipment, CSetHealth, CSystemChat, EquipmentSlot, PlayerInfoEntry,
        SlotData,
    },
};
use ferrum_utils::{math::Vector3, text::chat_component};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

pub use connection::NetworkConnection;
pub use equipment::PlayerEquipment;

use crate::game_mode::GameMode;

/// Full health.
pub const MAX_HEALTH: f32 = 20.0;
/// Full food bar.
pub const MAX_FOOD: i32 = 20;

#[derive(Debug, Clone, Copy)]
struct HealthState {
    health: f32,
    food: i32,
    /// Changed since the last health packet.
    dirty: bool,
}

/// A struct representing a player.
pub struct Player {
    /// The player's entity id, unique within a world.
    pub entity_id: i32,
    /// The player's UUID.
    pub uuid: Uuid,
    /// The player's name.
    pub username: String,
    /// The player's connection.
    pub connection: Arc<dyn NetworkConnection>,

    /// The player's position.
    pub position: Mutex<Vector3<f64>>,
    /// `(yaw, pitch)` in degrees.
    pub rotation: Mutex<(f32, f32)>,
    /// The player's game mode.
    pub game_mode: Mutex<GameMode>,

    display_name: Mutex<Option<String>>,
    equipment: Mutex<PlayerEquipment>,
    health: Mutex<HealthState>,
    /// Set once the world has removed this player. Sends hold the read side,
    /// so after the write side is taken no further packet goes out.
    detached: RwLock<bool>,
}

impl Player {
    /// Creates a new player.
    ///
    /// Health is marked unsynced so the first tick sends it.
    pub fn new(
        entity_id: i32,
        uuid: Uuid,
        username: impl Into<String>,
        game_mode: GameMode,
        connection: Arc<dyn NetworkConnection>,
    ) -> Self {
        Self {
            entity_id,
            uuid,
            username: username.into(),
            connection,
            position: Mutex::new(Vector3::default()),
            rotation: Mutex::new((0.0, 0.0)),
            game_mode: Mutex::new(game_mode),
            display_name: Mutex::new(None),
            equipment: Mutex::new(PlayerEquipment::new()),
            health: Mutex::new(HealthState {
                health: MAX_HEALTH,
                food: MAX_FOOD,
                dirty: true,
            }),
            detached: RwLock::new(false),
        }
    }

    /// Encodes and sends a packet to this player.
    ///
    /// Encoding failures are logged and the packet is dropped.
    pub fn send_packet<P: ClientPacket>(&self, packet: &P) {
        match EncodedPacket::from_packet(packet) {
            Ok(encoded) => {
                self.send_encoded(encoded);
            }
            Err(err) => log::warn!("Dropping packet for {}: {err}", self.username),
        }
    }

    /// Sends an already encoded packet. Returns false if the player was removed.
    pub fn send_encoded(&self, packet: EncodedPacket) -> bool {
        self.while_attached(|| self.connection.send_encoded(packet))
            .is_some()
    }

    /// Runs `f` unless the player has been removed.
    ///
    /// Removal waits for `f` to return, so everything `f` sends reaches
    /// clients before the removal broadcast does. `f` must not remove this
    /// player itself.
    pub(crate) fn while_attached<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let detached = self.detached.read_recursive();
        if *detached {
            return None;
        }
        Some(f())
    }

    /// Sends a chat line to this player only.
    pub fn send_chat(&self, message: &str) {
        self.send_packet(&CSystemChat::text(message));
    }

    /// Stops all further sends. Waits for sends already in flight.
    pub(crate) fn detach(&self) {
        *self.detached.write() = true;
    }

    /// Whether the world has removed this player.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        *self.detached.read_recursive()
    }

    /// The name shown in the player list, if different from `username`.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.display_name.lock().clone()
    }

    /// Sets or clears the player list name.
    pub fn set_display_name(&self, name: Option<String>) {
        *self.display_name.lock() = name;
    }

    /// Updates health and food. They are sent on the next tick.
    pub fn set_health(&self, health: f32, food: i32) {
        let mut state = self.health.lock();
        state.health = health.clamp(0.0, MAX_HEALTH);
        state.food = food.clamp(0, MAX_FOOD);
        state.dirty = true;
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health.lock().health
    }

    /// Current food level.
    #[must_use]
    pub fn food(&self) -> i32 {
        self.health.lock().food
    }

    /// Sends health and food now.
    pub fn send_health(&self) {
        let packet = {
            let mut state = self.health.lock();
            state.dirty = false;
            CSetHealth {
                health: state.health,
                food: state.food,
                food_saturation: 0.0,
            }
        };
        self.send_packet(&packet);
    }

    /// Sets the item in an equipment slot. Returns the previous item.
    pub fn set_equipment(&self, slot: EquipmentSlot, item: SlotData) -> SlotData {
        self.equipment.lock().set(slot, item)
    }

    /// The item in an equipment slot.
    #[must_use]
    pub fn equipment(&self, slot: EquipmentSlot) -> SlotData {
        self.equipment.lock().get(slot)
    }

    /// Equipment packets describing this player to others.
    #[must_use]
    pub fn equipment_packets(&self) -> Vec<CSetEquipment> {
        self.equipment.lock().sync_packets(self.entity_id)
    }

    /// This player's player list entry.
    #[must_use]
    pub fn info_entry(&self) -> PlayerInfoEntry {
        PlayerInfoEntry {
            uuid: self.uuid,
            name: self.username.clone(),
            game_mode: self.game_mode.lock().id(),
            latency: self.connection.latency(),
            display_name: self.display_name().as_deref().map(chat_component),
        }
    }

    /// The packet that spawns this player for others.
    #[must_use]
    pub fn spawn_packet(&self) -> CAddPlayer {
        let pos = *self.position.lock();
        let (yaw, pitch) = *self.rotation.lock();
        CAddPlayer {
            entity_id: self.entity_id,
            uuid: self.uuid,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            yaw,
            pitch,
            held_item: self
                .equipment(EquipmentSlot::MainHand)
                .item_id
                .unwrap_or(0),
        }
    }

    /// Ticks the player: connection upkeep, then health if it changed.
    pub fn tick(&self) -> anyhow::Result<()> {
        if self.connection.closed() {
            return Ok(());
        }
        self.connection.tick();
        if self.health.lock().dirty {
            self.send_health();
        }
        Ok(())
    }
}
