//! Big-endian wire serialization.
use std::io::{self, Write};

use uuid::Uuid;

/// A value that can be written to the wire.
pub trait WriteTo {
    /// Writes `self` to `writer`.
    fn write(&self, writer: &mut impl Write) -> io::Result<()>;
}

/// A value written with a length prefix of type `P`.
pub trait PrefixedWrite {
    /// Writes the length as a `P` followed by the contents.
    fn write_prefixed<P: TryFrom<usize> + WriteTo>(&self, writer: &mut impl Write)
    -> io::Result<()>;
}

macro_rules! impl_write_be {
    ($($ty:ty),*) => {
        $(
            impl WriteTo for $ty {
                fn write(&self, writer: &mut impl Write) -> io::Result<()> {
                    writer.write_all(&self.to_be_bytes())
                }
            }
        )*
    };
}

impl_write_be!(u8, i8, u16, i16, i32, i64, f32, f64);

impl WriteTo for bool {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        u8::from(*self).write(writer)
    }
}

impl WriteTo for Uuid {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }
}

impl<T: WriteTo> WriteTo for Option<T> {
    /// Writes a presence flag followed by the value when present.
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        match self {
            Some(value) => {
                true.write(writer)?;
                value.write(writer)
            }
            None => false.write(writer),
        }
    }
}

impl PrefixedWrite for str {
    fn write_prefixed<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
    ) -> io::Result<()> {
        let len = P::try_from(self.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "string too long for prefix")
        })?;
        len.write(writer)?;
        writer.write_all(self.as_bytes())
    }
}

impl WriteTo for String {
    /// Strings on the wire are always `VarInt` prefixed.
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.write_prefixed::<crate::codec::VarInt>(writer)
    }
}
