//! Cell-string geometry
//!
//! A string outline is a row of identical rectangular cells along the
//! outline's local X axis:
//!
//! ```text
//!         plus      cell        dist      cell       minus
//!       +------+-----------+          +-----------+------+
//!       |      |           +----------+           |      |
//!       |      |           |          |           |      |
//!       |      |           +----------+           |      |
//!       +------+-----------+          +-----------+------+
//! ```
//!
//! Cells are `cell_length` long and `cell_width` wide. The connector between
//! two cells is inset by the catalog's gap parameter on both long edges; the
//! leading (`plus`) and trailing (`minus`) margin tabs are inset by the
//! margin parameter. [`generate`] draws this polygon from parameters and
//! [`reconstruct`] recovers the parameters from any polygon of that shape.

mod generate;
mod reconstruct;

pub use generate::{generate, generate_outline, SIBLING_CLEARANCE};
pub use reconstruct::{reconstruct, reconstruct_vertices};

use crate::catalog::{CellType, CellTypeCatalog};
use crate::error::{IdfError, Result};

/// Allowed deviation between an outline and a catalog entry (mm)
pub const MANUFACTURING_TOLERANCE: f64 = 0.1;

const GRID_STEPS_PER_MM: f64 = 1000.0;

/// Resolution that reconstructed lengths are rounded to (mm)
pub const MANUFACTURING_GRID: f64 = 1.0 / GRID_STEPS_PER_MM;

/// Round a length to the manufacturing grid
pub fn quantize(value: f64) -> f64 {
    let steps = (value * GRID_STEPS_PER_MM).round();
    if steps == 0.0 {
        0.0
    } else {
        steps / GRID_STEPS_PER_MM
    }
}

/// Manufacturing parameters of a cell string
#[derive(Debug, Clone, PartialEq)]
pub struct StringParameters {
    /// Spacing between consecutive cells
    pub dist: f64,
    /// Catalog entry name
    pub cell_type: String,
    pub nr_cells: u32,
    /// Leading margin before the first cell
    pub plus: f64,
    /// Trailing margin after the last cell
    pub minus: f64,
}

/// Parameters derived from a string outline; recomputed after every
/// structural edit
pub type StringMetadata = StringParameters;

impl StringParameters {
    /// Create parameters without validating them
    pub fn new(cell_type: impl Into<String>, nr_cells: u32, dist: f64, plus: f64, minus: f64) -> Self {
        StringParameters {
            dist,
            cell_type: cell_type.into(),
            nr_cells,
            plus,
            minus,
        }
    }

    /// Create parameters from untyped request input (signed cell count)
    pub fn checked(
        cell_type: impl Into<String>,
        nr_cells: i64,
        dist: f64,
        plus: f64,
        minus: f64,
    ) -> Result<Self> {
        if nr_cells < 1 {
            return Err(IdfError::validation(
                "nr_cells",
                format!("a string needs at least one cell, got {}", nr_cells),
            ));
        }
        let nr_cells = u32::try_from(nr_cells)
            .map_err(|_| IdfError::validation("nr_cells", "cell count too large"))?;
        Ok(Self::new(cell_type, nr_cells, dist, plus, minus))
    }

    /// Spacing is meaningless for a single cell; it is reported as zero
    pub fn normalized(&self) -> Self {
        let mut params = self.clone();
        if params.nr_cells == 1 {
            params.dist = 0.0;
        }
        params
    }

    /// Check physical ranges and resolve the cell type
    pub fn validate<'a>(&self, catalog: &'a CellTypeCatalog) -> Result<&'a CellType> {
        let cell = catalog.get(&self.cell_type).ok_or_else(|| {
            IdfError::validation(
                "cell_type",
                format!("unknown cell type '{}'", self.cell_type),
            )
        })?;
        if self.nr_cells < 1 {
            return Err(IdfError::validation("nr_cells", "a string needs at least one cell"));
        }
        if !self.dist.is_finite() || self.dist < 0.0 {
            return Err(IdfError::validation("dist", "spacing must be a non-negative number"));
        }
        if self.nr_cells > 1 && self.dist <= 0.0 {
            return Err(IdfError::validation(
                "dist",
                "spacing between cells must be greater than zero",
            ));
        }
        if !self.plus.is_finite() || self.plus < 0.0 {
            return Err(IdfError::validation("plus", "margin must be a non-negative number"));
        }
        if !self.minus.is_finite() || self.minus < 0.0 {
            return Err(IdfError::validation("minus", "margin must be a non-negative number"));
        }
        Ok(cell)
    }

    /// Overall length along the string axis
    pub fn span(&self, cell: &CellType) -> f64 {
        let n = self.nr_cells as f64;
        self.plus + n * cell.length + (n - 1.0).max(0.0) * self.dist + self.minus
    }

    /// Conventional outline name, e.g. `String M10 HC 5 Cells 2mm +10mm -10mm`
    pub fn default_name(&self) -> String {
        format!(
            "String {} {} Cells {}mm +{}mm -{}mm",
            self.cell_type,
            self.nr_cells,
            self.dist.trunc() as i64,
            self.plus.trunc() as i64,
            self.minus.trunc() as i64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        let params = StringParameters::new("M10 HC", 5, 2.0, 10.0, 10.0);
        assert_eq!(params.default_name(), "String M10 HC 5 Cells 2mm +10mm -10mm");
    }

    #[test]
    fn test_default_name_truncates() {
        let params = StringParameters::new("G1", 3, 2.7, 10.5, 9.99);
        assert_eq!(params.default_name(), "String G1 3 Cells 2mm +10mm -9mm");
    }

    #[test]
    fn test_validate_rejects_zero_spacing() {
        let catalog = CellTypeCatalog::standard();
        let params = StringParameters::new("M10", 4, 0.0, 10.0, 10.0);
        assert!(matches!(
            params.validate(&catalog),
            Err(IdfError::Validation { ref parameter, .. }) if parameter == "dist"
        ));
    }

    #[test]
    fn test_validate_single_cell_allows_zero_spacing() {
        let catalog = CellTypeCatalog::standard();
        let params = StringParameters::new("M10", 1, 0.0, 10.0, 10.0);
        assert!(params.validate(&catalog).is_ok());
    }

    #[test]
    fn test_checked_rejects_negative_count() {
        assert!(StringParameters::checked("M10", -3, 2.0, 10.0, 10.0).is_err());
        assert!(StringParameters::checked("M10", 0, 2.0, 10.0, 10.0).is_err());
        assert_eq!(
            StringParameters::checked("M10", 3, 2.0, 10.0, 10.0).unwrap().nr_cells,
            3
        );
    }

    #[test]
    fn test_span() {
        let catalog = CellTypeCatalog::standard();
        let params = StringParameters::new("M10 HC", 5, 2.0, 10.0, 10.0);
        let cell = params.validate(&catalog).unwrap();
        assert_eq!(params.span(cell), 10.0 + 5.0 * 91.0 + 4.0 * 2.0 + 10.0);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(2.3000000000000114), 2.3);
        assert_eq!(quantize(9.9999999), 10.0);
        assert_eq!(quantize(-0.0000001), 0.0);
    }
}
