//! # Ferrum Core
//!
//! The authoritative world simulation: time of day, weather, scheduled block
//! ticks, physics propagation, the player and entity rosters, and the fixed
//! cadence driver that advances them.

pub mod behavior;
pub mod chunk;
pub mod config;
pub mod difficulty;
pub mod entity;
pub mod game_mode;
pub mod level_type;
pub mod player;
pub mod scheduler;
pub mod tick_rate;
pub mod ticks;
pub mod world;
