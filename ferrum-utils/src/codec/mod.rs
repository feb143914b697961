//! Variable-length integer encoding.
mod var_int;

pub use var_int::VarInt;
