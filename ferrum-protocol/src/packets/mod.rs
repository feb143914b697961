//! Clientbound packets.
pub mod game;
