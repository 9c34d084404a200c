//! Editor configuration
//!
//! Values the surrounding tool supplies once per session: busbar height
//! variants, the default busbar footprint and the cell-type catalog. The
//! configuration is plain data; it is loaded from JSON by the caller and
//! passed into the calls that need it.

use crate::catalog::CellTypeCatalog;
use crate::error::{IdfError, Result};
use serde::{Deserialize, Serialize};

/// Busbar geometry defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusbarSettings {
    /// Outline height when the busbar is flat on the glass
    pub low_height: f64,
    /// Outline height when the busbar is raised
    pub high_height: f64,
    /// Default length of a new busbar outline
    pub length: f64,
    /// Default width of a new busbar outline
    pub width: f64,
}

impl Default for BusbarSettings {
    fn default() -> Self {
        Self {
            low_height: 0.3,
            high_height: 0.8,
            length: 182.0,
            width: 6.0,
        }
    }
}

impl BusbarSettings {
    /// Height for the given raised flag
    pub fn height_for(&self, raised: bool) -> f64 {
        if raised {
            self.high_height
        } else {
            self.low_height
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfiguration {
    pub busbar: BusbarSettings,
    pub cell_types: CellTypeCatalog,
}

impl Default for EditorConfiguration {
    fn default() -> Self {
        Self {
            busbar: BusbarSettings::default(),
            cell_types: CellTypeCatalog::standard(),
        }
    }
}

impl EditorConfiguration {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfiguration = serde_json::from_str(json)
            .map_err(|e| IdfError::validation("configuration", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| IdfError::validation("configuration", e.to_string()))
    }

    /// Check physical ranges
    pub fn validate(&self) -> Result<()> {
        let b = &self.busbar;
        if !(b.low_height.is_finite() && b.low_height >= 0.0) {
            return Err(IdfError::validation("busbar.low_height", "must be a non-negative number"));
        }
        if !(b.high_height.is_finite() && b.high_height > b.low_height) {
            return Err(IdfError::validation(
                "busbar.high_height",
                "must be greater than busbar.low_height",
            ));
        }
        if !(b.length > 0.0 && b.width > 0.0) {
            return Err(IdfError::validation(
                "busbar.length/width",
                "must be greater than zero",
            ));
        }
        if self.cell_types.is_empty() {
            return Err(IdfError::validation("cell_types", "catalog is empty"));
        }
        Ok(())
    }
}
