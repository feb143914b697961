//! Chunk columns and the provider that loads, generates and saves them.
//!
//! The world never owns chunk storage. It asks a [`ChunkProvider`] for the
//! column containing a position and reads or writes through it.

use std::{io, sync::Arc};

use ferrum_utils::{BlockPos, ChunkPos};
use thiserror::Error;

pub mod ram_only;

/// Lowest valid block y.
pub const MIN_Y: i32 = 0;
/// Number of block layers in a column.
pub const COLUMN_HEIGHT: i32 = 256;

/// An error raised by a chunk provider.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// The column could not be generated or loaded.
    #[error("failed to load chunk {pos}: {reason}")]
    Load {
        /// Column that failed.
        pos: ChunkPos,
        /// Provider specific detail.
        reason: String,
    },
    /// The block state does not fit the packed `id << 4 | metadata` storage.
    #[error("block {id}:{metadata} at {pos} is out of range")]
    InvalidState {
        /// Where the write was attempted.
        pos: BlockPos,
        /// Requested block id.
        id: u16,
        /// Requested metadata.
        metadata: u8,
    },
    /// Saving failed.
    #[error("failed to save level {level}: {source}")]
    Save {
        /// Level being saved.
        level: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// A 16 wide column of blocks.
///
/// Coordinates are chunk local: `x` and `z` in `0..16`. Reads outside
/// `MIN_Y..MIN_Y + COLUMN_HEIGHT` return air and writes there are ignored.
pub trait ChunkColumn: Send + Sync {
    /// The position of this column.
    fn pos(&self) -> ChunkPos;

    /// Block id at the given local coordinates.
    fn block_id(&self, x: u8, y: i32, z: u8) -> u16;

    /// Block metadata at the given local coordinates.
    fn metadata(&self, x: u8, y: i32, z: u8) -> u8;

    /// Writes a block. Callers pass an id of at most 4095 and metadata of at
    /// most 15.
    fn set_block(&self, x: u8, y: i32, z: u8, id: u16, metadata: u8);

    /// Flags the column as needing a save.
    fn mark_dirty(&self);

    /// Whether the column has unsaved changes.
    fn is_dirty(&self) -> bool;
}

/// Supplies chunk columns to a world.
///
/// `column_for` must generate or load the column. It never returns a
/// placeholder silently; failures are reported as [`ChunkError`].
pub trait ChunkProvider: Send + Sync {
    /// Returns the column at `pos`, generating or loading it if needed.
    fn column_for(&self, pos: ChunkPos) -> Result<Arc<dyn ChunkColumn>, ChunkError>;

    /// Persists every dirty column of `level_name`.
    fn save_all(&self, level_name: &str) -> Result<(), ChunkError>;

    /// Where players appear when they join.
    fn spawn_point(&self) -> BlockPos {
        BlockPos::new(0, 64, 0)
    }
}
