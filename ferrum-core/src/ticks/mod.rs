//! Scheduled block ticks.
mod block_tick_queue;

pub use block_tick_queue::BlockTickQueue;
