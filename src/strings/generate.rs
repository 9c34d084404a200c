//! Outline generation from string parameters

use super::StringParameters;
use crate::catalog::{CellType, CellTypeCatalog};
use crate::error::Result;
use crate::model::{close_polygon, ComponentOutline, Vertex};
use crate::types::{Vector2, COORD_EPSILON};

/// Clearance between siblings generated in one batch (mm)
pub const SIBLING_CLEARANCE: f64 = 10.0;

/// One run along the string axis with a constant cross-section
#[derive(Debug, Clone, Copy)]
struct Segment {
    length: f64,
    /// Inset from both long edges
    inset: f64,
}

fn segments(params: &StringParameters, cell: &CellType) -> Vec<Segment> {
    let mut out = Vec::with_capacity(2 * params.nr_cells as usize + 1);
    if params.plus > 0.0 {
        out.push(Segment {
            length: params.plus,
            inset: cell.margin,
        });
    }
    for i in 0..params.nr_cells {
        if i > 0 {
            out.push(Segment {
                length: params.dist,
                inset: cell.gap,
            });
        }
        out.push(Segment {
            length: cell.length,
            inset: 0.0,
        });
    }
    if params.minus > 0.0 {
        out.push(Segment {
            length: params.minus,
            inset: cell.margin,
        });
    }
    out
}

/// Generate the closed outline polygon of a string.
///
/// The string runs along `+x` from `x = 0`. `ordinal` shifts it across the
/// axis by `ordinal * (cell_width + SIBLING_CLEARANCE)`.
pub fn generate(
    params: &StringParameters,
    catalog: &CellTypeCatalog,
    ordinal: Option<usize>,
) -> Result<Vec<Vertex>> {
    let cell = params.validate(catalog)?;
    let segments = segments(params, cell);
    let y0 = ordinal.unwrap_or(0) as f64 * (cell.width + SIBLING_CLEARANCE);

    // segment boundaries along the axis
    let mut stations = Vec::with_capacity(segments.len() + 1);
    stations.push(0.0);
    for seg in &segments {
        let last = stations[stations.len() - 1];
        stations.push(last + seg.length);
    }

    let mut bottom = Vec::with_capacity(segments.len() * 2);
    for (i, seg) in segments.iter().enumerate() {
        bottom.push(Vector2::new(stations[i], y0 + seg.inset));
        bottom.push(Vector2::new(stations[i + 1], y0 + seg.inset));
    }

    let mut top = Vec::with_capacity(segments.len() * 2);
    for (i, seg) in segments.iter().enumerate().rev() {
        let y = y0 + cell.width - seg.inset;
        top.push(Vector2::new(stations[i + 1], y));
        top.push(Vector2::new(stations[i], y));
    }

    let mut vertices: Vec<Vertex> = Vec::with_capacity(bottom.len() + top.len() + 1);
    for p in bottom.into_iter().chain(top) {
        let duplicate = vertices
            .last()
            .map_or(false, |last| last.position().approx_eq(&p, COORD_EPSILON));
        if !duplicate {
            vertices.push(Vertex::new(p.x, p.y));
        }
    }
    close_polygon(&mut vertices);

    tracing::debug!(
        cell_type = %params.cell_type,
        nr_cells = params.nr_cells,
        vertices = vertices.len(),
        "generated string outline"
    );
    Ok(vertices)
}

/// Generate a complete string outline named `name`
pub fn generate_outline(
    name: impl Into<String>,
    params: &StringParameters,
    catalog: &CellTypeCatalog,
    ordinal: Option<usize>,
) -> Result<ComponentOutline> {
    let vertices = generate(params, catalog, ordinal)?;
    Ok(ComponentOutline::new(name, 0.0, vertices))
}
