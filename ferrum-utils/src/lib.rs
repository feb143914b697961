//! # Ferrum Utils
//!
//! Shared value types and wire helpers used by every Ferrum crate.

pub mod codec;
mod direction;
pub mod math;
pub mod serial;
pub mod text;
pub mod types;

pub use direction::Direction;
pub use types::{BlockPos, ChunkPos, UpdateFlags};
