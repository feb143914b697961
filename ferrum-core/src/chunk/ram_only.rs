//! RAM-only chunk storage.
//!
//! Columns are created empty on first access and live until the provider is
//! dropped. Saving only clears dirty flags. Useful for tests and worlds that
//! do not need persistence.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use ferrum_utils::{BlockPos, ChunkPos};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{COLUMN_HEIGHT, ChunkColumn, ChunkError, ChunkProvider, MIN_Y};

const BLOCKS_PER_COLUMN: usize = 16 * 16 * COLUMN_HEIGHT as usize;

/// A column stored as packed `id << 4 | metadata` values.
pub struct RamColumn {
    pos: ChunkPos,
    blocks: RwLock<Box<[u16]>>,
    dirty: AtomicBool,
}

impl RamColumn {
    /// Creates a column filled with air.
    #[must_use]
    pub fn empty(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: RwLock::new(vec![0; BLOCKS_PER_COLUMN].into_boxed_slice()),
            dirty: AtomicBool::new(false),
        }
    }

    fn index(x: u8, y: i32, z: u8) -> Option<usize> {
        if !(MIN_Y..MIN_Y + COLUMN_HEIGHT).contains(&y) {
            return None;
        }
        let y = (y - MIN_Y) as usize;
        Some((y << 8) | (usize::from(z & 15) << 4) | usize::from(x & 15))
    }

    fn packed(&self, x: u8, y: i32, z: u8) -> u16 {
        Self::index(x, y, z).map_or(0, |i| self.blocks.read()[i])
    }
}

impl ChunkColumn for RamColumn {
    fn pos(&self) -> ChunkPos {
        self.pos
    }

    fn block_id(&self, x: u8, y: i32, z: u8) -> u16 {
        self.packed(x, y, z) >> 4
    }

    fn metadata(&self, x: u8, y: i32, z: u8) -> u8 {
        (self.packed(x, y, z) & 0x0F) as u8
    }

    fn set_block(&self, x: u8, y: i32, z: u8, id: u16, metadata: u8) {
        if let Some(i) = Self::index(x, y, z) {
            self.blocks.write()[i] = (id << 4) | u16::from(metadata & 0x0F);
        }
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

/// In-memory chunk provider.
pub struct RamOnlyChunkProvider {
    columns: RwLock<FxHashMap<ChunkPos, Arc<RamColumn>>>,
    spawn: BlockPos,
    saves: AtomicUsize,
}

impl RamOnlyChunkProvider {
    /// Creates a provider whose columns start as air.
    #[must_use]
    pub fn empty_world() -> Self {
        Self::with_spawn(BlockPos::new(0, 64, 0))
    }

    /// Creates an empty provider that reports `spawn` as the spawn point.
    #[must_use]
    pub fn with_spawn(spawn: BlockPos) -> Self {
        Self {
            columns: RwLock::new(FxHashMap::default()),
            spawn,
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of columns created so far.
    #[must_use]
    pub fn loaded_columns(&self) -> usize {
        self.columns.read().len()
    }

    /// Number of completed `save_all` calls.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Acquire)
    }

    fn column(&self, pos: ChunkPos) -> Arc<RamColumn> {
        if let Some(column) = self.columns.read().get(&pos) {
            return column.clone();
        }
        self.columns
            .write()
            .entry(pos)
            .or_insert_with(|| Arc::new(RamColumn::empty(pos)))
            .clone()
    }
}

impl Default for RamOnlyChunkProvider {
    fn default() -> Self {
        Self::empty_world()
    }
}

impl ChunkProvider for RamOnlyChunkProvider {
    fn column_for(&self, pos: ChunkPos) -> Result<Arc<dyn ChunkColumn>, ChunkError> {
        let column: Arc<dyn ChunkColumn> = self.column(pos);
        Ok(column)
    }

    fn save_all(&self, level_name: &str) -> Result<(), ChunkError> {
        let mut saved = 0usize;
        for column in self.columns.read().values() {
            if column.dirty.swap(false, Ordering::AcqRel) {
                saved += 1;
            }
        }
        self.saves.fetch_add(1, Ordering::AcqRel);
        log::debug!("Flushed {saved} dirty columns of {level_name} (RAM only)");
        Ok(())
    }

    fn spawn_point(&self) -> BlockPos {
        self.spawn
    }
}
