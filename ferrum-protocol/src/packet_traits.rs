//! Packet encoding.
use std::io;

use ferrum_utils::{codec::VarInt, serial::WriteTo};
use thiserror::Error;

/// An error raised while encoding a packet.
#[derive(Debug, Error)]
pub enum PacketWriteError {
    /// A field could not be written.
    #[error("failed to encode packet {id:#04x}: {source}")]
    Io {
        /// The id of the packet being encoded.
        id: i32,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// A packet sent from the server to the client.
pub trait ClientPacket: WriteTo {
    /// The packet id written ahead of the body.
    const PACKET_ID: i32;
}

/// A packet already encoded as `VarInt id ++ body`.
///
/// Framing (length prefix, compression, encryption) is the connection's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPacket {
    id: i32,
    data: Vec<u8>,
    body_start: usize,
}

impl EncodedPacket {
    /// Encodes `packet`.
    pub fn from_packet<P: ClientPacket>(packet: &P) -> Result<Self, PacketWriteError> {
        let wrap = |source| PacketWriteError::Io {
            id: P::PACKET_ID,
            source,
        };
        let mut data = Vec::with_capacity(32);
        VarInt(P::PACKET_ID).write(&mut data).map_err(wrap)?;
        let body_start = data.len();
        packet.write(&mut data).map_err(wrap)?;
        Ok(Self {
            id: P::PACKET_ID,
            data,
            body_start,
        })
    }

    /// The packet id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// The full encoding, id included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The body without the id.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.data[self.body_start..]
    }
}
