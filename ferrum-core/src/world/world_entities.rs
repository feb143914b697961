//! This module contains the implementation of the world's roster and broadcast methods.
//!
//! Broadcasts never iterate the live roster. They take a snapshot under the
//! roster lock and send after releasing it.
use std::sync::Arc;

use ferrum_protocol::{
    ClientPacket, EncodedPacket,
    packets::game::{CPlayerInfoUpdate, CRemoveEntities, CSystemChat},
};

use super::{World, WorldError};
use crate::{entity::Entity, player::Player};

impl World {
    /// Adds a player to the world and introduces them to everyone online.
    ///
    /// Everyone, the new player included, gets the new player's list entry.
    /// The new player and each existing player are then spawned for one
    /// another, with their equipment.
    pub fn add_player(&self, player: Arc<Player>) -> Result<(), WorldError> {
        let existing = {
            let mut players = self.players.lock();
            if players.iter().any(|p| p.entity_id == player.entity_id) {
                drop(players);
                log::warn!(
                    "Rejected {}: entity id {} already in {}",
                    player.username,
                    player.entity_id,
                    self.level_name
                );
                player.connection.close();
                return Err(WorldError::DuplicateEntityId(player.entity_id));
            }
            let existing = players.clone();
            players.push(player.clone());
            existing
        };

        // Removal of either side waits for its introductions to finish, so a
        // client never sees a spawn after the matching removal.
        player.while_attached(|| {
            self.broadcast(&CPlayerInfoUpdate::add_player(player.info_entry()));

            let spawn_new = player.spawn_packet();
            let equipment_new = player.equipment_packets();
            for other in &existing {
                other.while_attached(|| {
                    player.send_packet(&CPlayerInfoUpdate::add_player(other.info_entry()));
                    player.send_packet(&other.spawn_packet());
                    for packet in other.equipment_packets() {
                        player.send_packet(&packet);
                    }

                    other.send_packet(&spawn_new);
                    for packet in &equipment_new {
                        other.send_packet(packet);
                    }
                });
            }
        });

        log::info!(
            "{} joined {} (entity {})",
            player.username,
            self.level_name,
            player.entity_id
        );
        Ok(())
    }

    /// Removes a player from the world.
    ///
    /// Once this returns the player receives nothing more from the world.
    /// Everyone left is told to drop the player's list entry and entity.
    pub fn remove_player(&self, entity_id: i32) -> Option<Arc<Player>> {
        let removed = {
            let mut players = self.players.lock();
            let index = players.iter().position(|p| p.entity_id == entity_id)?;
            players.remove(index)
        };
        removed.detach();

        self.broadcast(&CPlayerInfoUpdate::remove_player(removed.uuid));
        self.broadcast(&CRemoveEntities::single(entity_id));

        log::info!("{} left {}", removed.username, self.level_name);
        Some(removed)
    }

    /// Finds an online player by entity id.
    #[must_use]
    pub fn get_player(&self, entity_id: i32) -> Option<Arc<Player>> {
        self.players
            .lock()
            .iter()
            .find(|p| p.entity_id == entity_id)
            .cloned()
    }

    /// A point-in-time copy of the roster.
    #[must_use]
    pub fn online_players(&self) -> Vec<Arc<Player>> {
        self.players.lock().clone()
    }

    /// Number of online players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.lock().len()
    }

    /// Sends `packet` to every online player.
    pub fn broadcast<P: ClientPacket>(&self, packet: &P) {
        self.broadcast_except(packet, None);
    }

    /// Sends `packet` to every online player but the one with entity id `excluded`.
    ///
    /// The packet is encoded once and shared.
    pub fn broadcast_except<P: ClientPacket>(&self, packet: &P, excluded: Option<i32>) {
        let encoded = match EncodedPacket::from_packet(packet) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::warn!("Dropping broadcast in {}: {err}", self.level_name);
                return;
            }
        };
        for player in self.online_players() {
            if Some(player.entity_id) != excluded {
                player.send_encoded(encoded.clone());
            }
        }
    }

    /// Sends a chat line to everyone but `excluded`.
    pub fn broadcast_chat(&self, message: &str, excluded: Option<&Player>) {
        self.broadcast_except(&CSystemChat::text(message), excluded.map(|p| p.entity_id));
    }

    /// Relays a chat message typed by `sender` to everyone, as `<name> message`.
    pub fn handle_chat(&self, sender: &Player, message: &str) {
        log::info!("<{}> {}", sender.username, message);
        self.broadcast_chat(&format!("<{}> {}", sender.username, message), None);
    }

    /// Adds an entity to be ticked.
    pub fn add_entity(&self, entity: Arc<dyn Entity>) -> Result<(), WorldError> {
        let entity_id = entity.entity_id();
        let mut entities = self.entities.lock();
        if entities.iter().any(|e| e.entity_id() == entity_id) {
            return Err(WorldError::DuplicateEntityId(entity_id));
        }
        entities.push(entity);
        Ok(())
    }

    /// Stops ticking an entity. Unknown ids are ignored.
    pub fn remove_entity(&self, entity_id: i32) -> Option<Arc<dyn Entity>> {
        let mut entities = self.entities.lock();
        let index = entities.iter().position(|e| e.entity_id() == entity_id)?;
        Some(entities.remove(index))
    }

    /// A point-in-time copy of the entity list.
    #[must_use]
    pub fn entities(&self) -> Vec<Arc<dyn Entity>> {
        self.entities.lock().clone()
    }
}
