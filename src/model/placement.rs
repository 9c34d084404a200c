//! Component placements (instances of a shared outline)

use super::ComponentType;
use crate::types::{Handle, Transform2D, Vector2};

/// Position and orientation of one placed component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementVector {
    pub x: f64,
    pub y: f64,
    /// Mounting offset above the board; doubles as the layer/height flag
    pub offset: f64,
    /// Rotation in degrees, counter-clockwise
    pub rotation: f64,
}

impl PlacementVector {
    /// Placement at `(x, y)` with the given rotation and no mounting offset
    pub const fn new(x: f64, y: f64, rotation: f64) -> Self {
        PlacementVector {
            x,
            y,
            offset: 0.0,
            rotation,
        }
    }

    /// Origin as a vector
    pub fn origin(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Transform from outline space to board space
    pub fn transform(&self) -> Transform2D {
        Transform2D::new(self.origin(), self.rotation)
    }
}

/// Instance-level record referencing an outline by name
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPlacement {
    pub handle: Handle,
    /// Reference designator, unique per document (`BB001`, `STR004`)
    pub id: String,
    /// Outline name this placement instantiates
    pub name: String,
    pub part_number: String,
    pub component_type: ComponentType,
    pub placement: PlacementVector,
    /// Board side token (`TOP` / `BOTTOM`)
    pub side: String,
    /// Placement status token (`PLACED`, `UNPLACED`, `MCAD`, `ECAD`)
    pub status: String,
}

impl ComponentPlacement {
    /// Create a top-side, placed component
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        component_type: ComponentType,
        placement: PlacementVector,
    ) -> Self {
        ComponentPlacement {
            handle: Handle::NULL,
            id: id.into(),
            name: name.into(),
            part_number: component_type.as_str().to_ascii_uppercase(),
            component_type,
            placement,
            side: "TOP".to_string(),
            status: "PLACED".to_string(),
        }
    }
}
