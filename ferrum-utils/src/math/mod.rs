//! Small fixed-size vector types.
mod vector2;
mod vector3;

pub use vector2::Vector2;
pub use vector3::Vector3;
