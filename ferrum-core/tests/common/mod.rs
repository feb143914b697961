//! Shared fixtures for world tests.
#![allow(dead_code)]

use std::{
    io::Cursor,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use ferrum_core::{
    behavior::{Block, BlockBehavior, BlockRegistry},
    chunk::ram_only::RamOnlyChunkProvider,
    config::WorldConfig,
    game_mode::GameMode,
    player::{NetworkConnection, Player},
    world::World,
};
use ferrum_protocol::EncodedPacket;
use ferrum_utils::codec::VarInt;
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use uuid::Uuid;

/// A connection that records every packet it is sent.
#[derive(Default)]
pub struct RecordingConnection {
    packets: Mutex<Vec<EncodedPacket>>,
    closed: AtomicBool,
}

impl RecordingConnection {
    /// Ids of every packet received so far, decoded from the wire bytes.
    pub fn ids(&self) -> Vec<i32> {
        self.packets
            .lock()
            .iter()
            .map(|p| VarInt::read(&mut Cursor::new(p.as_bytes())).expect("valid id"))
            .collect()
    }

    pub fn packets_with_id(&self, id: i32) -> Vec<EncodedPacket> {
        self.packets
            .lock()
            .iter()
            .filter(|p| p.id() == id)
            .cloned()
            .collect()
    }

    pub fn count(&self, id: i32) -> usize {
        self.packets_with_id(id).len()
    }

    pub fn clear(&self) {
        self.packets.lock().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl NetworkConnection for RecordingConnection {
    fn send_encoded(&self, packet: EncodedPacket) {
        self.packets.lock().push(packet);
    }

    fn latency(&self) -> i32 {
        0
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Creates a player backed by a recording connection.
pub fn player(entity_id: i32, name: &str) -> (Arc<Player>, Arc<RecordingConnection>) {
    let connection = Arc::new(RecordingConnection::default());
    let player = Arc::new(Player::new(
        entity_id,
        Uuid::from_u128(entity_id as u128),
        name,
        GameMode::Survival,
        connection.clone(),
    ));
    (player, connection)
}

/// A RAM backed world with a seeded weather generator.
pub fn world_with(registry: Arc<dyn BlockRegistry>, config: WorldConfig) -> Arc<World> {
    Arc::new(World::with_rng(
        &config,
        Arc::new(RamOnlyChunkProvider::empty_world()),
        registry,
        Box::new(StdRng::seed_from_u64(7)),
    ))
}

pub fn world(registry: Arc<dyn BlockRegistry>) -> Arc<World> {
    world_with(registry, WorldConfig::default())
}

/// Which callback fired, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Tick(Block),
    Physics(Block),
}

/// Records every callback it receives into a shared log.
#[derive(Clone, Default)]
pub struct Recorder {
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

impl BlockBehavior for Recorder {
    fn on_tick(&self, _world: &World, block: &Block) -> anyhow::Result<()> {
        self.calls.lock().push(Call::Tick(*block));
        Ok(())
    }

    fn on_physics_notify(&self, _world: &World, block: &Block) -> anyhow::Result<()> {
        self.calls.lock().push(Call::Physics(*block));
        Ok(())
    }
}
