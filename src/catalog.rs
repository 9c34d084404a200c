//! Cell-type catalog
//!
//! The catalog is read-only input: every call that needs cell dimensions
//! takes it by reference and nothing in the engine mutates or stores it.
//! It serializes as the JSON object the panel tool has always used,
//! `{"M10 HC": [182.0, 91.0, 10, 13.1], ...}`.

use crate::error::{IdfError, Result};
use crate::strings::MANUFACTURING_TOLERANCE;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dimensions of one cell type, in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct CellType {
    pub name: String,
    /// Extent across the string axis
    pub width: f64,
    /// Extent along the string axis
    pub length: f64,
    /// Inset of the inter-cell connector from each long edge
    pub gap: f64,
    /// Inset of the plus/minus margin tabs from each long edge
    pub margin: f64,
}

impl CellType {
    /// Create a cell type, rejecting dimensions that cannot form an outline
    pub fn new(name: impl Into<String>, width: f64, length: f64, gap: f64, margin: f64) -> Result<Self> {
        let name = name.into();
        let dims = [width, length, gap, margin];
        if dims.iter().any(|v| !v.is_finite()) {
            return Err(IdfError::validation(
                format!("cell type '{}'", name),
                "dimensions must be finite",
            ));
        }
        if width <= 0.0 || length <= 0.0 {
            return Err(IdfError::validation(
                format!("cell type '{}'", name),
                "width and length must be greater than zero",
            ));
        }
        // insets within tolerance read back as full-width cells
        let min_inset = MANUFACTURING_TOLERANCE;
        if gap <= min_inset
            || margin <= min_inset
            || 2.0 * gap >= width
            || 2.0 * margin >= width
        {
            return Err(IdfError::validation(
                format!("cell type '{}'", name),
                format!(
                    "gap and margin insets must exceed {} mm and stay narrower than half the cell width",
                    min_inset
                ),
            ));
        }
        Ok(CellType {
            name,
            width,
            length,
            gap,
            margin,
        })
    }

    /// Catalog row `[width, length, gap, margin]`
    pub fn as_row(&self) -> [f64; 4] {
        [self.width, self.length, self.gap, self.margin]
    }
}

/// Ordered cell-type catalog; order breaks reconstruction ties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, [f64; 4]>", into = "IndexMap<String, [f64; 4]>")]
pub struct CellTypeCatalog {
    entries: IndexMap<String, CellType>,
}

impl CellTypeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog the panel line ships with: M10, M10 half-cut and G1 cells
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (name, row) in [
            ("M10", [182.0, 182.0, 10.0, 13.1]),
            ("M10 HC", [182.0, 91.0, 10.0, 13.1]),
            ("G1", [158.75, 158.75, 5.0, 16.625]),
        ] {
            if let Ok(cell) = CellType::new(name, row[0], row[1], row[2], row[3]) {
                catalog.entries.insert(name.to_string(), cell);
            }
        }
        catalog
    }

    /// Add an entry; names are unique
    pub fn insert(&mut self, cell: CellType) -> Result<()> {
        if self.entries.contains_key(&cell.name) {
            return Err(IdfError::Consistency(format!(
                "cell type '{}' already exists in catalog",
                cell.name
            )));
        }
        self.entries.insert(cell.name.clone(), cell);
        Ok(())
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&CellType> {
        self.entries.get(name)
    }

    /// Look up an entry, failing with `NotFound`
    pub fn require(&self, name: &str) -> Result<&CellType> {
        self.get(name).ok_or_else(|| IdfError::NotFound {
            kind: "cell type",
            key: name.to_string(),
        })
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &CellType> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<IndexMap<String, [f64; 4]>> for CellTypeCatalog {
    type Error = IdfError;

    fn try_from(rows: IndexMap<String, [f64; 4]>) -> Result<Self> {
        let mut catalog = CellTypeCatalog::new();
        for (name, [width, length, gap, margin]) in rows {
            catalog.insert(CellType::new(name, width, length, gap, margin)?)?;
        }
        Ok(catalog)
    }
}

impl From<CellTypeCatalog> for IndexMap<String, [f64; 4]> {
    fn from(catalog: CellTypeCatalog) -> Self {
        catalog
            .entries
            .into_iter()
            .map(|(name, cell)| {
                let row = cell.as_row();
                (name, row)
            })
            .collect()
    }
}
