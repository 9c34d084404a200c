//! Placement transforms
//!
//! A placement maps outline-local coordinates onto the board: rotate
//! counter-clockwise by the placement angle (degrees), then translate by the
//! placement origin.

use crate::types::{BoundingBox2D, Vector2};

/// Rigid 2D transform from outline space to board space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Rotation in degrees, counter-clockwise
    pub angle: f64,
    /// Translation applied after the rotation
    pub offset: Vector2,
}

impl Transform2D {
    /// Create a transform from a placement origin and angle
    pub fn new(offset: Vector2, angle: f64) -> Self {
        Self { angle, offset }
    }

    /// Map a local point to board space
    pub fn apply(&self, local: Vector2) -> Vector2 {
        self.offset + local.rotated(self.angle)
    }

    /// Bounding box of a set of local points after transformation
    pub fn apply_bounds<'a, I>(&self, points: I) -> Option<BoundingBox2D>
    where
        I: IntoIterator<Item = &'a Vector2>,
    {
        BoundingBox2D::from_points(points.into_iter().map(|p| self.apply(*p)))
    }
}

/// Bring an angle in degrees into `[0, 360)`
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 || wrapped.abs() < 1e-9 {
        0.0
    } else {
        wrapped
    }
}

/// Helper to check if angle is effectively zero
pub fn is_zero_angle(degrees: f64) -> bool {
    let wrapped = normalize_angle(degrees);
    wrapped < 1e-9 || 360.0 - wrapped < 1e-9
}
