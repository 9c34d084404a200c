//! Core geometric types

mod bounds;
mod handle;
pub mod transform;
mod vector;

pub use bounds::BoundingBox2D;
pub use handle::Handle;
pub use transform::{is_zero_angle, normalize_angle, Transform2D};
pub use vector::{Vector2, COORD_EPSILON};
