//! Planar vector type used for outline vertices and placement origins

use std::fmt;
use std::ops::{Add, Sub};

/// Tolerance used when comparing board coordinates (millimetres)
pub const COORD_EPSILON: f64 = 1e-9;

/// 2D vector in board coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Zero vector
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Rotate counter-clockwise around the origin by `degrees`
    pub fn rotated(&self, degrees: f64) -> Vector2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Component-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Vector2, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Vector2::ZERO
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a + b, Vector2::new(4.0, 6.0));
        assert_eq!(b - a, Vector2::new(2.0, 2.0));
    }

    #[test]
    fn test_rotated_quarter_turn() {
        let v = Vector2::new(10.0, 0.0).rotated(90.0);
        assert!(v.approx_eq(&Vector2::new(0.0, 10.0), 1e-9));
    }

    #[test]
    fn test_rotated_half_turn() {
        let v = Vector2::new(3.0, -2.0).rotated(180.0);
        assert!(v.approx_eq(&Vector2::new(-3.0, 2.0), 1e-9));
    }
}
