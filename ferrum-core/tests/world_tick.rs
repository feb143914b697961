mod common;

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use common::{Call, Recorder, player, world, world_with};
use ferrum_core::{
    behavior::{BehaviorRegistry, Block, BlockBehavior, blocks},
    chunk::{ChunkColumn, ChunkError, ChunkProvider, ram_only::RamOnlyChunkProvider},
    config::WorldConfig,
    entity::Entity,
    game_mode::GameMode,
    player::{NetworkConnection, Player},
    world::{FaultSource, World},
};
use ferrum_protocol::{EncodedPacket, packet_ids::play};
use ferrum_utils::{BlockPos, ChunkPos, Direction, UpdateFlags};
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use uuid::Uuid;

const RECORDER: u16 = 5;

fn recorder_world() -> (Arc<World>, Recorder) {
    let recorder = Recorder::default();
    let mut registry = BehaviorRegistry::new();
    registry.register(RECORDER, recorder.clone());
    (world(Arc::new(registry)), recorder)
}

#[test]
fn day_wraps_and_broadcasts_time() {
    let world = world_with(
        Arc::new(BehaviorRegistry::new()),
        WorldConfig {
            initial_world_time: 23_999,
            ..WorldConfig::default()
        },
    );
    let (alice, connection) = player(1, "alice");
    world.add_player(alice).expect("joins");
    connection.clear();

    world.day_tick();

    assert_eq!(world.world_time(), 0);
    assert_eq!(world.day(), 2);
    let updates = connection.packets_with_id(play::C_SET_TIME);
    assert_eq!(updates.len(), 1);
    let mut expected = 2i64.to_be_bytes().to_vec();
    expected.extend_from_slice(&0i64.to_be_bytes());
    assert_eq!(updates[0].body(), expected);
}

#[test]
fn full_day_of_ticks_returns_to_same_time() {
    let world = world_with(
        Arc::new(BehaviorRegistry::new()),
        WorldConfig {
            initial_world_time: 6000,
            ..WorldConfig::default()
        },
    );
    for _ in 0..24_000 {
        world.day_tick();
    }
    assert_eq!(world.world_time(), 6000);
    assert_eq!(world.day(), 2);
    assert_eq!(world.game_time(), 24_000);
}

#[test]
fn set_world_time_stays_within_a_day() {
    let (world, _) = recorder_world();
    world.set_world_time(24_005);
    assert_eq!(world.world_time(), 5);
    world.set_world_time(-1);
    assert_eq!(world.world_time(), 23_999);
}

#[test]
fn rain_begins_when_countdown_runs_out() {
    let (world, _) = recorder_world();
    let (alice, connection) = player(1, "alice");
    world.add_player(alice).expect("joins");

    world.set_weather(false, 0);
    connection.clear();
    world.weather_tick();

    assert!(world.is_raining());
    assert!((12_000..36_000).contains(&world.ticks_until_weather_change()));
    let events = connection.packets_with_id(play::C_GAME_EVENT);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].body(), [2, 0x3F, 0x80, 0x00, 0x00]);
}

#[test]
fn rain_ends_when_countdown_runs_out() {
    let (world, _) = recorder_world();
    world.set_weather(true, 1);
    world.weather_tick();
    assert!(world.is_raining());
    world.weather_tick();
    assert!(!world.is_raining());
    assert!((24_000..96_000).contains(&world.ticks_until_weather_change()));
}

#[test]
fn same_seed_gives_same_weather() {
    let make = || {
        World::with_rng(
            &WorldConfig::default(),
            Arc::new(RamOnlyChunkProvider::empty_world()),
            Arc::new(BehaviorRegistry::new()),
            Box::new(StdRng::seed_from_u64(99)),
        )
    };
    assert_eq!(
        make().ticks_until_weather_change(),
        make().ticks_until_weather_change()
    );
}

#[test]
fn rescheduling_keeps_latest_due_time() {
    let (world, recorder) = recorder_world();
    let pos = BlockPos::new(3, 64, -7);
    world
        .set_block(pos, RECORDER, 0, UpdateFlags::empty())
        .expect("ram");

    world.schedule_block_tick(pos, 10);
    world.schedule_block_tick(pos, 1);
    assert_eq!(world.pending_block_ticks(), 1);
    assert_eq!(world.pending_block_tick(pos), Some(world.game_time() + 1));

    let report = world.tick();
    assert_eq!(report.block_ticks, 1);
    assert_eq!(world.pending_block_ticks(), 0);
    assert_eq!(
        recorder.calls(),
        vec![Call::Tick(Block {
            id: RECORDER,
            metadata: 0,
            pos
        })]
    );
}

#[test]
fn block_tick_waits_for_its_delay() {
    let (world, recorder) = recorder_world();
    let pos = BlockPos::new(0, 10, 0);
    world
        .set_block(pos, RECORDER, 0, UpdateFlags::empty())
        .expect("ram");
    world.schedule_block_tick(pos, 3);

    world.tick();
    world.tick();
    assert!(recorder.calls().is_empty());
    world.tick();
    assert_eq!(recorder.calls().len(), 1);
}

/// Reschedules itself until it has ticked `limit` times.
struct Repeater {
    ticks: Arc<AtomicUsize>,
    limit: usize,
}

impl BlockBehavior for Repeater {
    fn on_tick(&self, world: &World, block: &Block) -> anyhow::Result<()> {
        if self.ticks.fetch_add(1, Ordering::SeqCst) + 1 < self.limit {
            world.schedule_block_tick(block.pos, 1);
        }
        Ok(())
    }
}

#[test]
fn reschedule_from_inside_tick_is_kept() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let mut registry = BehaviorRegistry::new();
    registry.register(
        6,
        Repeater {
            ticks: ticks.clone(),
            limit: 3,
        },
    );
    let world = world(Arc::new(registry));
    let pos = BlockPos::new(1, 1, 1);
    world.set_block(pos, 6, 0, UpdateFlags::empty()).expect("ram");
    world.schedule_block_tick(pos, 1);

    for _ in 0..10 {
        world.tick();
    }
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    assert_eq!(world.pending_block_ticks(), 0);
}

#[test]
fn physics_skips_air_neighbours() {
    let (world, recorder) = recorder_world();
    let center = BlockPos::new(-20, 70, 33);

    world.apply_physics(center);

    assert!(recorder.calls().is_empty());
    assert_eq!(world.pending_block_ticks(), 0);
    assert_eq!(world.get_block(center).expect("ram").id, 0);
}

#[test]
fn physics_notifies_non_air_neighbours_in_order() {
    let (world, recorder) = recorder_world();
    let center = BlockPos::new(-1, 70, -1);
    let up = Direction::Up.relative(center);
    let west = Direction::West.relative(center);
    world.set_block(up, RECORDER, 1, UpdateFlags::empty()).expect("ram");
    world.set_block(west, RECORDER, 2, UpdateFlags::empty()).expect("ram");

    world.apply_physics(center);

    assert_eq!(
        recorder.calls(),
        vec![
            Call::Physics(Block {
                id: RECORDER,
                metadata: 2,
                pos: west
            }),
            Call::Physics(Block {
                id: RECORDER,
                metadata: 1,
                pos: up
            }),
        ]
    );
}

#[test]
fn set_block_broadcasts_and_notifies() {
    let (world, recorder) = recorder_world();
    let (alice, connection) = player(1, "alice");
    world.add_player(alice).expect("joins");
    connection.clear();

    let pos = BlockPos::new(8, 64, 8);
    let below = Direction::Down.relative(pos);
    world.set_block(below, RECORDER, 0, UpdateFlags::empty()).expect("ram");
    assert_eq!(connection.count(play::C_BLOCK_UPDATE), 0);

    world.set_block(pos, 1, 0, UpdateFlags::UPDATE_ALL).expect("ram");

    let updates = connection.packets_with_id(play::C_BLOCK_UPDATE);
    assert_eq!(updates.len(), 1);
    let mut expected = pos.as_packed_i64().to_be_bytes().to_vec();
    expected.push(1 << 4);
    assert_eq!(updates[0].body(), expected);
    assert_eq!(recorder.calls().len(), 1);
    assert_eq!(world.get_block(pos).expect("ram").id, 1);
}

/// Flips metadata 0 to 1 when notified, notifying its own neighbours.
struct Flipper;

const FLIPPER: u16 = 7;

impl BlockBehavior for Flipper {
    fn on_physics_notify(&self, world: &World, block: &Block) -> anyhow::Result<()> {
        if block.metadata == 0 {
            world.set_block(block.pos, FLIPPER, 1, UpdateFlags::UPDATE_NEIGHBORS)?;
        }
        Ok(())
    }
}

fn flipped_in_column(max_physics_depth: Option<u32>) -> usize {
    let mut registry = BehaviorRegistry::new();
    registry.register(FLIPPER, Flipper);
    let world = world_with(
        Arc::new(registry),
        WorldConfig {
            max_physics_depth,
            ..WorldConfig::default()
        },
    );
    for y in 10..=40 {
        world
            .set_block(BlockPos::new(0, y, 0), FLIPPER, 0, UpdateFlags::empty())
            .expect("ram");
    }
    world
        .set_block(BlockPos::new(0, 9, 0), FLIPPER, 1, UpdateFlags::UPDATE_NEIGHBORS)
        .expect("ram");

    (10..=40)
        .filter(|y| {
            world
                .get_block(BlockPos::new(0, *y, 0))
                .expect("ram")
                .metadata
                == 1
        })
        .count()
}

#[test]
fn physics_recursion_is_unbounded_by_default() {
    assert_eq!(flipped_in_column(None), 31);
}

#[test]
fn physics_depth_cap_stops_the_chain() {
    assert_eq!(flipped_in_column(Some(4)), 4);
}

#[test]
fn water_flows_down_then_spreads() {
    let world = world(Arc::new(BehaviorRegistry::vanilla()));
    let floor = BlockPos::new(0, 10, 0);
    for x in -3..=3 {
        for z in -3..=3 {
            world
                .set_block(floor.offset(x, 0, z), 1, 0, UpdateFlags::empty())
                .expect("ram");
        }
    }
    let source = floor.offset(0, 2, 0);
    world
        .set_block(source, blocks::WATER, 0, UpdateFlags::UPDATE_ALL)
        .expect("ram");
    world.schedule_block_tick(source, 5);

    for _ in 0..40 {
        world.tick();
    }

    let above_floor = floor.offset(0, 1, 0);
    assert_eq!(world.get_block(above_floor).expect("ram").id, blocks::FLOWING_WATER);
    let side = Direction::East.relative(above_floor);
    let side = world.get_block(side).expect("ram");
    assert_eq!(side.id, blocks::FLOWING_WATER);
    assert_eq!(side.metadata, 1);
}

struct Counter(i32, Arc<AtomicUsize>);

impl Entity for Counter {
    fn entity_id(&self) -> i32 {
        self.0
    }

    fn tick(&self, _world: &World) -> anyhow::Result<()> {
        self.1.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Failing(i32);

impl Entity for Failing {
    fn entity_id(&self) -> i32 {
        self.0
    }

    fn tick(&self, _world: &World) -> anyhow::Result<()> {
        anyhow::bail!("cannot path")
    }
}

struct Panicking(i32);

impl Entity for Panicking {
    fn entity_id(&self) -> i32 {
        self.0
    }

    fn tick(&self, _world: &World) -> anyhow::Result<()> {
        panic!("entity state corrupted")
    }
}

#[test]
fn failing_actors_do_not_stop_the_tick() {
    let (world, _) = recorder_world();
    let ticks = Arc::new(AtomicUsize::new(0));
    world.add_entity(Arc::new(Failing(10))).expect("unique");
    world.add_entity(Arc::new(Panicking(11))).expect("unique");
    world
        .add_entity(Arc::new(Counter(12, ticks.clone())))
        .expect("unique");

    let report = world.tick();
    let report_again = world.tick();

    assert_eq!(ticks.load(Ordering::SeqCst), 2);
    assert_eq!(report.faults.len(), 2);
    assert_eq!(report_again.faults.len(), 2);
    assert_eq!(report.faults[0].source, FaultSource::Entity { entity_id: 10 });
    assert_eq!(report.faults[0].error, "cannot path");
    assert_eq!(report.faults[1].source, FaultSource::Entity { entity_id: 11 });
    assert_eq!(report.faults[1].error, "entity state corrupted");
}

#[test]
fn entities_are_added_and_removed() {
    let (world, _) = recorder_world();
    let ticks = Arc::new(AtomicUsize::new(0));
    world
        .add_entity(Arc::new(Counter(1, ticks.clone())))
        .expect("unique");
    assert!(world.add_entity(Arc::new(Failing(1))).is_err());
    assert_eq!(world.entities().len(), 1);

    assert!(world.remove_entity(1).is_some());
    assert!(world.remove_entity(1).is_none());
    world.tick();
    assert_eq!(ticks.load(Ordering::SeqCst), 0);
}

#[test]
fn maintenance_saves_on_interval() {
    let provider = Arc::new(RamOnlyChunkProvider::empty_world());
    let world = World::with_rng(
        &WorldConfig {
            save_interval_ticks: 3,
            ..WorldConfig::default()
        },
        provider.clone(),
        Arc::new(BehaviorRegistry::new()),
        Box::new(StdRng::seed_from_u64(1)),
    );

    let saved: Vec<bool> = (0..6).map(|_| world.tick().saved).collect();
    assert_eq!(saved, [false, false, true, false, false, true]);
    assert_eq!(provider.save_count(), 2);
}

#[test]
fn players_sync_health_on_change() {
    let (world, _) = recorder_world();
    let (alice, connection) = player(1, "alice");
    world.add_player(alice.clone()).expect("joins");
    connection.clear();

    world.tick();
    assert_eq!(connection.count(play::C_SET_HEALTH), 1);

    alice.set_health(7.5, 12);
    world.tick();
    let health = connection.packets_with_id(play::C_SET_HEALTH);
    assert_eq!(health.len(), 2);
    let mut expected = 7.5f32.to_be_bytes().to_vec();
    expected.push(12);
    expected.extend_from_slice(&0.0f32.to_be_bytes());
    assert_eq!(health[1].body(), expected);
}

#[test]
fn set_block_at_axis_bounds_reaches_wrapped_neighbour() {
    let (world, recorder) = recorder_world();
    let wrapped = BlockPos::new(i32::MIN, 64, 0);
    world
        .set_block(wrapped, RECORDER, 0, UpdateFlags::empty())
        .expect("ram");

    world
        .set_block(BlockPos::new(i32::MAX, 64, 0), 1, 0, UpdateFlags::UPDATE_ALL)
        .expect("ram");
    world
        .set_block(BlockPos::new(0, 64, i32::MIN), 1, 0, UpdateFlags::UPDATE_ALL)
        .expect("ram");

    assert_eq!(
        recorder.calls(),
        vec![Call::Physics(Block {
            id: RECORDER,
            metadata: 0,
            pos: wrapped
        })]
    );
}

#[test]
fn out_of_range_block_states_are_rejected() {
    let (world, _) = recorder_world();
    let (alice, connection) = player(1, "alice");
    world.add_player(alice).expect("joins");
    connection.clear();
    let pos = BlockPos::new(2, 64, 2);

    for (id, metadata) in [(5000, 0), (1, 20), (0x1000, 0x10)] {
        let err = world
            .set_block(pos, id, metadata, UpdateFlags::UPDATE_ALL)
            .expect_err("does not fit");
        assert!(matches!(err, ChunkError::InvalidState { .. }));
    }
    assert_eq!(connection.count(play::C_BLOCK_UPDATE), 0);
    assert!(world.get_block(pos).expect("ram").is_air());

    world
        .set_block(pos, 0x0FFF, 0x0F, UpdateFlags::UPDATE_ALL)
        .expect("largest state fits");
    let block = world.get_block(pos).expect("ram");
    assert_eq!((block.id, block.metadata), (0x0FFF, 0x0F));
    assert_eq!(connection.count(play::C_BLOCK_UPDATE), 1);
}

/// Appends `tag` to a shared log whenever its owner is ticked.
struct TickLog {
    tag: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl NetworkConnection for TickLog {
    fn send_encoded(&self, _packet: EncodedPacket) {}

    fn tick(&self) {
        self.log.lock().push(self.tag);
    }

    fn latency(&self) -> i32 {
        0
    }

    fn close(&self) {}

    fn closed(&self) -> bool {
        false
    }
}

impl Entity for TickLog {
    fn entity_id(&self) -> i32 {
        100
    }

    fn tick(&self, _world: &World) -> anyhow::Result<()> {
        self.log.lock().push(self.tag);
        Ok(())
    }
}

fn logged_player(
    entity_id: i32,
    tag: &'static str,
    log: &Arc<Mutex<Vec<&'static str>>>,
) -> Arc<Player> {
    Arc::new(Player::new(
        entity_id,
        Uuid::from_u128(entity_id as u128),
        tag,
        GameMode::Survival,
        Arc::new(TickLog {
            tag,
            log: log.clone(),
        }),
    ))
}

#[test]
fn players_tick_before_entities() {
    let (world, _) = recorder_world();
    let log = Arc::new(Mutex::new(Vec::new()));
    world
        .add_entity(Arc::new(TickLog {
            tag: "entity",
            log: log.clone(),
        }))
        .expect("unique");
    world.add_player(logged_player(1, "alice", &log)).expect("joins");
    world.add_player(logged_player(2, "bob", &log)).expect("joins");

    world.tick();
    world.tick();
    assert_eq!(
        *log.lock(),
        ["alice", "bob", "entity", "alice", "bob", "entity"]
    );
}

/// A connection whose upkeep always panics.
struct BrokenConnection;

impl NetworkConnection for BrokenConnection {
    fn send_encoded(&self, _packet: EncodedPacket) {}

    fn tick(&self) {
        panic!("socket gone")
    }

    fn latency(&self) -> i32 {
        0
    }

    fn close(&self) {}

    fn closed(&self) -> bool {
        false
    }
}

#[test]
fn failing_player_does_not_stop_the_others() {
    let (world, _) = recorder_world();
    let broken = Arc::new(Player::new(
        1,
        Uuid::from_u128(1),
        "broken",
        GameMode::Survival,
        Arc::new(BrokenConnection),
    ));
    world.add_player(broken).expect("joins");
    let (bob, connection) = player(2, "bob");
    world.add_player(bob).expect("joins");
    connection.clear();

    let report = world.tick();

    assert_eq!(report.faults.len(), 1);
    assert_eq!(
        report.faults[0].source,
        FaultSource::Player {
            entity_id: 1,
            name: "broken".to_owned()
        }
    );
    assert_eq!(report.faults[0].error, "socket gone");
    assert_eq!(connection.count(play::C_SET_HEALTH), 1);
    assert_eq!(world.player_count(), 2);
}

/// Fails every scheduled tick.
struct Crumbling;

const CRUMBLING: u16 = 12;

impl BlockBehavior for Crumbling {
    fn on_tick(&self, _world: &World, _block: &Block) -> anyhow::Result<()> {
        anyhow::bail!("support missing")
    }
}

#[test]
fn failing_block_tick_does_not_stop_the_others() {
    let recorder = Recorder::default();
    let mut registry = BehaviorRegistry::new();
    registry.register(RECORDER, recorder.clone());
    registry.register(CRUMBLING, Crumbling);
    let world = world(Arc::new(registry));

    let crumbling = BlockPos::new(0, 64, 0);
    let recording = BlockPos::new(5, 64, 5);
    world
        .set_block(crumbling, CRUMBLING, 0, UpdateFlags::empty())
        .expect("ram");
    world
        .set_block(recording, RECORDER, 0, UpdateFlags::empty())
        .expect("ram");
    world.schedule_block_tick(crumbling, 1);
    world.schedule_block_tick(recording, 1);

    let report = world.tick();

    assert_eq!(report.block_ticks, 2);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].source, FaultSource::Block { pos: crumbling });
    assert_eq!(report.faults[0].error, "support missing");
    assert_eq!(
        recorder.calls(),
        vec![Call::Tick(Block {
            id: RECORDER,
            metadata: 0,
            pos: recording
        })]
    );
}

/// RAM storage whose saves always fail.
struct ReadOnlyDisk(RamOnlyChunkProvider);

impl ChunkProvider for ReadOnlyDisk {
    fn column_for(&self, pos: ChunkPos) -> Result<Arc<dyn ChunkColumn>, ChunkError> {
        self.0.column_for(pos)
    }

    fn save_all(&self, level_name: &str) -> Result<(), ChunkError> {
        Err(ChunkError::Save {
            level: level_name.to_owned(),
            source: io::Error::other("read-only file system"),
        })
    }
}

#[test]
fn failed_save_keeps_the_world_ticking() {
    let recorder = Recorder::default();
    let mut registry = BehaviorRegistry::new();
    registry.register(RECORDER, recorder.clone());
    let world = World::with_rng(
        &WorldConfig {
            save_interval_ticks: 2,
            ..WorldConfig::default()
        },
        Arc::new(ReadOnlyDisk(RamOnlyChunkProvider::empty_world())),
        Arc::new(registry),
        Box::new(StdRng::seed_from_u64(1)),
    );
    let pos = BlockPos::new(0, 64, 0);
    world
        .set_block(pos, RECORDER, 0, UpdateFlags::empty())
        .expect("ram");
    world.schedule_block_tick(pos, 3);

    let reports: Vec<_> = (0..4).map(|_| world.tick()).collect();

    let saved: Vec<bool> = reports.iter().map(|r| r.saved).collect();
    assert_eq!(saved, [false, true, false, true]);
    assert!(reports.iter().all(|r| r.faults.is_empty()));
    assert_eq!(world.game_time(), 4);
    assert_eq!(recorder.calls().len(), 1);
}
