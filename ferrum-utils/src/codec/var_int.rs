use std::{
    io::{self, Read, Write},
    num::TryFromIntError,
};

use crate::serial::WriteTo;

/// A protocol `VarInt`: seven data bits per byte, high bit set on all but the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    /// Maximum encoded length in bytes.
    pub const MAX_SIZE: usize = 5;

    /// Returns the exact number of bytes `val` occupies once written.
    #[must_use]
    pub const fn written_size(val: i32) -> usize {
        match val {
            0 => 1,
            n => (31 - (n as u32).leading_zeros() as usize) / 7 + 1,
        }
    }

    /// Reads a `VarInt` from `read`.
    pub fn read(read: &mut impl Read) -> io::Result<i32> {
        let mut val = 0u32;
        for i in 0..Self::MAX_SIZE {
            let mut byte = [0u8; 1];
            read.read_exact(&mut byte)?;
            val |= u32::from(byte[0] & 0x7F) << (i * 7);
            if byte[0] & 0x80 == 0 {
                return Ok(val as i32);
            }
        }
        Err(io::Error::new(io::ErrorKind::InvalidData, "VarInt too large"))
    }
}

impl WriteTo for VarInt {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        // Work on the unsigned bit pattern so negative values terminate.
        let mut val = self.0 as u32;
        loop {
            let byte = (val & 0x7F) as u8;
            val >>= 7;
            if val == 0 {
                return writer.write_all(&[byte]);
            }
            writer.write_all(&[byte | 0x80])?;
        }
    }
}

impl TryFrom<usize> for VarInt {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Ok(Self(i32::try_from(value)?))
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<VarInt> for i32 {
    fn from(value: VarInt) -> Self {
        value.0
    }
}
