//! This module contains the `NetworkConnection` trait that abstracts network connections.
//!
//! The trait is object-safe so the world can hold `dyn NetworkConnection` for real
//! sockets and for test connections that record what they were sent.

use ferrum_protocol::EncodedPacket;

/// An object-safe trait for player connections.
///
/// Packets arrive pre-encoded; `Player::send_packet()` handles the encoding.
/// Each packet is handed over as soon as it is built. An implementation may
/// batch per connection as long as it keeps the order packets were sent in.
pub trait NetworkConnection: Send + Sync {
    /// Sends a pre-encoded packet.
    fn send_encoded(&self, packet: EncodedPacket);

    /// Performs per-tick connection maintenance (e.g., keep-alive).
    fn tick(&self) {}

    /// Returns the current latency in milliseconds.
    fn latency(&self) -> i32;

    /// Closes the connection.
    fn close(&self);

    /// Returns whether the connection is closed.
    fn closed(&self) -> bool;
}
