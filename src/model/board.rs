//! Board outline

use super::outline::{is_closed, Vertex};
use crate::types::{BoundingBox2D, Handle};

/// Panel outline with its thickness
#[derive(Debug, Clone, PartialEq)]
pub struct BoardOutline {
    pub handle: Handle,
    /// Owner token from the section marker (`UNOWNED`, `MCAD`, `ECAD`)
    pub owner: String,
    /// Board (glass) thickness
    pub thickness: f64,
    /// Closed polygon in board coordinates
    pub vertices: Vec<Vertex>,
}

impl BoardOutline {
    /// Rectangular board spanning `(0, 0)` to `(-width, -length)`, the way
    /// the panel line lays out a new glass panel
    pub fn rectangle(width: f64, length: f64, thickness: f64) -> Self {
        BoardOutline {
            handle: Handle::NULL,
            owner: "UNOWNED".to_string(),
            thickness,
            vertices: vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(0.0, -length),
                Vertex::new(-width, -length),
                Vertex::new(-width, 0.0),
                Vertex::new(0.0, 0.0),
            ],
        }
    }

    /// Bounding box of the board polygon
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(self.vertices.iter().map(Vertex::position))
    }

    /// Check the closed-polygon invariant
    pub fn is_closed(&self) -> bool {
        is_closed(&self.vertices)
    }
}
