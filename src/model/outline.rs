//! Component outlines shared by every placement of the same name

use super::ComponentType;
use crate::types::{BoundingBox2D, Handle, Vector2, COORD_EPSILON};

/// One outline point record: `loop x y angle`.
///
/// `angle` is the included arc angle of the segment ending at this point
/// (0 for straight segments). It is the third numeric field of the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Loop label (0 = counter-clockwise outer loop)
    pub loop_label: u32,
    pub x: f64,
    pub y: f64,
    /// Included arc angle in degrees
    pub angle: f64,
}

impl Vertex {
    /// Straight-segment vertex on loop 0
    pub const fn new(x: f64, y: f64) -> Self {
        Vertex {
            loop_label: 0,
            x,
            y,
            angle: 0.0,
        }
    }

    /// Planar position
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Same vertex moved by `delta`
    pub fn translated(&self, delta: Vector2) -> Self {
        Vertex {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }
}

/// Check that a polygon has at least one point and ends where it starts
pub fn is_closed(vertices: &[Vertex]) -> bool {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) => first.position().approx_eq(&last.position(), COORD_EPSILON),
        _ => false,
    }
}

/// Append the first vertex if the polygon is open
pub fn close_polygon(vertices: &mut Vec<Vertex>) {
    if let Some(first) = vertices.first().copied() {
        if !is_closed(vertices) {
            vertices.push(Vertex {
                angle: 0.0,
                ..first
            });
        }
    }
}

/// Library section an outline was read from or will be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineSection {
    /// `.ELECTRICAL`
    Electrical,
    /// `.MECHANICAL`
    Mechanical,
}

impl OutlineSection {
    /// Section keyword without the leading dot
    pub fn keyword(&self) -> &'static str {
        match self {
            OutlineSection::Electrical => "ELECTRICAL",
            OutlineSection::Mechanical => "MECHANICAL",
        }
    }
}

/// Polygon geometry for a component, keyed by name
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutline {
    /// Record identity inside the document
    pub handle: Handle,
    /// Geometry name (unique key)
    pub name: String,
    pub component_type: ComponentType,
    pub section: OutlineSection,
    pub part_number: String,
    /// Unit token from the record (`MM` or `THOU`)
    pub units: String,
    /// Component height above the board
    pub height: f64,
    /// Closed polygon in outline-local coordinates
    pub vertices: Vec<Vertex>,
}

impl ComponentOutline {
    /// Create an outline, classifying it by name and closing the polygon
    pub fn new(name: impl Into<String>, height: f64, vertices: Vec<Vertex>) -> Self {
        let name = name.into();
        let component_type = ComponentType::classify(&name);
        let mut vertices = vertices;
        close_polygon(&mut vertices);
        ComponentOutline {
            handle: Handle::NULL,
            part_number: component_type.as_str().to_ascii_uppercase(),
            name,
            component_type,
            section: OutlineSection::Electrical,
            units: "MM".to_string(),
            height,
            vertices,
        }
    }

    /// Axis-aligned rectangle with its lower-left corner on the origin
    pub fn rectangle(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        let vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(length, 0.0),
            Vertex::new(length, width),
            Vertex::new(0.0, width),
            Vertex::new(0.0, 0.0),
        ];
        Self::new(name, height, vertices)
    }

    /// Vertex positions in outline space
    pub fn positions(&self) -> Vec<Vector2> {
        self.vertices.iter().map(Vertex::position).collect()
    }

    /// Bounding box in outline space
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(self.vertices.iter().map(Vertex::position))
    }

    /// Check the closed-polygon invariant
    pub fn is_closed(&self) -> bool {
        is_closed(&self.vertices)
    }
}
