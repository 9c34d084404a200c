//! Parameter recovery from arbitrary string outlines
//!
//! The polygon is cut into slices at every distinct coordinate along the
//! candidate axis. Each slice has a constant cross-section, measured with a
//! scanline through its middle; adjacent slices with the same cross-section
//! are merged. The resulting profile is matched against every catalog entry.

use super::{quantize, StringParameters, MANUFACTURING_TOLERANCE};
use crate::catalog::{CellType, CellTypeCatalog};
use crate::error::{IdfError, Result};
use crate::model::{ComponentOutline, Vertex};

/// Coordinates closer than this are the same station
const SLICE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    /// `(along, across)` coordinates of a vertex
    fn project(self, v: &Vertex) -> (f64, f64) {
        match self {
            Axis::X => (v.x, v.y),
            Axis::Y => (v.y, v.x),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slice {
    start: f64,
    end: f64,
    low: f64,
    high: f64,
}

impl Slice {
    fn length(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug)]
struct Profile {
    slices: Vec<Slice>,
    low: f64,
    high: f64,
}

impl Profile {
    fn width(&self) -> f64 {
        self.high - self.low
    }

    fn span(&self) -> f64 {
        match (self.slices.first(), self.slices.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0.0,
        }
    }

    /// Insets of a slice from the low and high long edges
    fn insets(&self, slice: &Slice) -> (f64, f64) {
        (slice.low - self.low, self.high - slice.high)
    }
}

/// Build the cross-section profile, or `None` when a scanline does not cut
/// the polygon in exactly one interval
fn profile(vertices: &[Vertex], axis: Axis) -> Option<Profile> {
    let points: Vec<(f64, f64)> = vertices.iter().map(|v| axis.project(v)).collect();
    if points.len() < 3 {
        return None;
    }

    let mut stations: Vec<f64> = points.iter().map(|p| p.0).collect();
    stations.sort_by(f64::total_cmp);
    stations.dedup_by(|a, b| (*a - *b).abs() < SLICE_EPSILON);

    let n = points.len();
    let mut slices: Vec<Slice> = Vec::new();
    for pair in stations.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mid = (start + end) / 2.0;

        let mut hits = Vec::with_capacity(2);
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            if (a.0 < mid) != (b.0 < mid) {
                let t = (mid - a.0) / (b.0 - a.0);
                hits.push(a.1 + t * (b.1 - a.1));
            }
        }
        if hits.len() != 2 {
            return None;
        }
        let low = hits[0].min(hits[1]);
        let high = hits[0].max(hits[1]);

        match slices.last_mut() {
            Some(prev)
                if (prev.low - low).abs() < SLICE_EPSILON
                    && (prev.high - high).abs() < SLICE_EPSILON =>
            {
                prev.end = end;
            }
            _ => slices.push(Slice {
                start,
                end,
                low,
                high,
            }),
        }
    }

    if slices.is_empty() {
        return None;
    }
    let low = slices.iter().map(|s| s.low).fold(f64::INFINITY, f64::min);
    let high = slices.iter().map(|s| s.high).fold(f64::NEG_INFINITY, f64::max);
    Some(Profile { slices, low, high })
}

/// Match a profile against one cell type, returning the parameters and the
/// summed absolute error
fn fit(profile: &Profile, cell: &CellType) -> Option<(StringParameters, f64)> {
    let tol = MANUFACTURING_TOLERANCE;
    let near = |a: f64, b: f64| (a - b).abs() <= tol;

    let mut residual = (profile.width() - cell.width).abs();
    if residual > tol {
        return None;
    }

    let is_cell = |s: &Slice| {
        let (lo, hi) = profile.insets(s);
        near(lo, 0.0) && near(hi, 0.0)
    };
    // error of a narrowed slice against the expected inset
    let inset_error = |s: &Slice, expected: f64| -> Option<f64> {
        let (lo, hi) = profile.insets(s);
        if near(lo, expected) && near(hi, expected) {
            Some((lo - expected).abs() + (hi - expected).abs())
        } else {
            None
        }
    };

    let slices = &profile.slices;
    let mut first = 0;
    let mut last = slices.len();
    let mut plus = 0.0;
    let mut minus = 0.0;

    if !is_cell(&slices[0]) {
        residual += inset_error(&slices[0], cell.margin)?;
        plus = slices[0].length();
        first = 1;
    }
    if last > first && !is_cell(&slices[last - 1]) {
        residual += inset_error(&slices[last - 1], cell.margin)?;
        minus = slices[last - 1].length();
        last -= 1;
    }

    // cell (gap cell)*
    let body = &slices[first..last];
    if body.is_empty() || body.len() % 2 == 0 {
        return None;
    }
    let mut gaps = Vec::with_capacity(body.len() / 2);
    for (i, slice) in body.iter().enumerate() {
        if i % 2 == 0 {
            if !is_cell(slice) || !near(slice.length(), cell.length) {
                return None;
            }
            residual += (slice.length() - cell.length).abs();
        } else {
            if is_cell(slice) {
                return None;
            }
            residual += inset_error(slice, cell.gap)?;
            gaps.push(slice.length());
        }
    }

    let nr_cells = (body.len() + 1) / 2;
    let dist = if gaps.is_empty() {
        0.0
    } else {
        gaps.iter().sum::<f64>() / gaps.len() as f64
    };
    for gap in &gaps {
        if !near(*gap, dist) {
            return None;
        }
        residual += (gap - dist).abs();
    }

    let n = nr_cells as f64;
    let expected = plus + n * cell.length + (n - 1.0) * dist + minus;
    if !near(profile.span(), expected) {
        return None;
    }
    residual += (profile.span() - expected).abs();

    let nr_cells = u32::try_from(nr_cells).ok()?;
    let params = StringParameters::new(
        cell.name.clone(),
        nr_cells,
        quantize(dist),
        quantize(plus),
        quantize(minus),
    );
    Some((params, residual))
}

/// Recover the manufacturing parameters of a string outline
pub fn reconstruct(outline: &ComponentOutline, catalog: &CellTypeCatalog) -> Result<StringParameters> {
    reconstruct_vertices(&outline.name, &outline.vertices, catalog)
}

/// Recover the manufacturing parameters of a bare polygon; `name` is only
/// used for error reporting
pub fn reconstruct_vertices(
    name: &str,
    vertices: &[Vertex],
    catalog: &CellTypeCatalog,
) -> Result<StringParameters> {
    if catalog.is_empty() {
        return Err(IdfError::geometry(name, "cell-type catalog is empty"));
    }

    let mut best: Option<(StringParameters, f64)> = None;
    for axis in [Axis::X, Axis::Y] {
        let Some(profile) = profile(vertices, axis) else {
            continue;
        };
        for cell in catalog.iter() {
            if let Some((params, residual)) = fit(&profile, cell) {
                // strict comparison keeps the earlier candidate on ties
                if best.as_ref().map_or(true, |(_, r)| residual < *r) {
                    best = Some((params, residual));
                }
            }
        }
    }

    match best {
        Some((params, residual)) => {
            tracing::debug!(
                outline = name,
                cell_type = %params.cell_type,
                nr_cells = params.nr_cells,
                residual,
                "reconstructed string parameters"
            );
            Ok(params)
        }
        None => Err(IdfError::geometry(
            name,
            format!(
                "no cell type in the catalog reproduces the outline within {} mm",
                MANUFACTURING_TOLERANCE
            ),
        )),
    }
}
