//! # Ferrum Protocol
//!
//! Clientbound packets the world core broadcasts, and the encoding that turns
//! them into id-prefixed frames for a connection.

pub mod packet_ids;
pub mod packet_traits;
pub mod packets;

pub use packet_traits::{ClientPacket, EncodedPacket, PacketWriteError};
