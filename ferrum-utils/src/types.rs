//! Coordinate types and chunk addressing.

// Wrapper types making it harder to accidentaly use the wrong underlying type.

use std::fmt::{self, Display};

use bitflags::bitflags;

use crate::math::{Vector2, Vector3};

/// Width of a chunk column along both horizontal axes.
pub const CHUNK_WIDTH: i32 = 16;

/// Maps a world axis value to its offset inside the containing chunk.
///
/// Equivalent to `((v % 16) + 16) % 16`, so negative coordinates land in `0..16`
/// instead of producing a negative remainder.
#[inline]
#[must_use]
pub const fn local_offset(value: i32) -> u8 {
    value.rem_euclid(CHUNK_WIDTH) as u8
}

/// Maps a world axis value to the index of its chunk along that axis.
#[inline]
#[must_use]
pub const fn chunk_index(value: i32) -> i32 {
    value >> 4
}

/// A chunk position. `0.y` is the world z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkPos(pub Vector2<i32>);

impl ChunkPos {
    /// Creates a chunk position from chunk indices.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self(Vector2::new(x, z))
    }

    /// The chunk x index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    /// The chunk z index.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.y
    }

    /// Packs the position into a single `i64`, x in the low half.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        (self.0.x as u32 as i64) | ((self.0.y as u32 as i64) << 32)
    }

    /// World x of the first block column in this chunk.
    #[must_use]
    pub const fn min_block_x(&self) -> i32 {
        self.0.x << 4
    }

    /// World z of the first block column in this chunk.
    #[must_use]
    pub const fn min_block_z(&self) -> i32 {
        self.0.y << 4
    }
}

impl Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0.x, self.0.y)
    }
}

/// A block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The x coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    /// The y coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    /// The z coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.z
    }

    /// The chunk column containing this block.
    #[must_use]
    pub const fn chunk_pos(&self) -> ChunkPos {
        ChunkPos::new(chunk_index(self.0.x), chunk_index(self.0.z))
    }

    /// The `(x, z)` offset of this block inside its chunk column.
    #[must_use]
    pub const fn local_xz(&self) -> (u8, u8) {
        (local_offset(self.0.x), local_offset(self.0.z))
    }

    /// Returns this position moved by the given delta.
    ///
    /// Wraps at the `i32` bounds, so the neighbour of `i32::MAX` is `i32::MIN`.
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.0.x.wrapping_add(dx),
            self.0.y.wrapping_add(dy),
            self.0.z.wrapping_add(dz),
        )
    }

    /// Packs the position as `x:26 | y:12 | z:26` bits, the layout used on the wire.
    #[must_use]
    pub const fn as_packed_i64(&self) -> i64 {
        ((self.0.x as i64 & 0x3FF_FFFF) << 38)
            | ((self.0.y as i64 & 0xFFF) << 26)
            | (self.0.z as i64 & 0x3FF_FFFF)
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

bitflags! {
    /// Side effects of a block write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UpdateFlags: u8 {
        /// Notify the six neighbours so their physics can react.
        const UPDATE_NEIGHBORS = 0b01;
        /// Send a block change to every online player.
        const UPDATE_CLIENTS = 0b10;
        /// Both of the above.
        const UPDATE_ALL = Self::UPDATE_NEIGHBORS.bits() | Self::UPDATE_CLIENTS.bits();
    }
}

impl Default for UpdateFlags {
    fn default() -> Self {
        Self::UPDATE_ALL
    }
}
