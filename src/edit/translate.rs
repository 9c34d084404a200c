//! Translation of placements

use super::require_finite;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use indexmap::IndexSet;

/// What a translation moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateTarget {
    /// One placement by id
    Placement(String),
    /// Several placements by id; duplicates move once
    Group(Vec<String>),
    /// Every placement; the board outline stays where it is
    All,
}

impl IdfDocument {
    /// Move placements by `(dx, dy)`, returning how many moved
    pub fn translate(&mut self, target: &TranslateTarget, dx: f64, dy: f64) -> Result<usize> {
        require_finite("dx", dx)?;
        require_finite("dy", dy)?;

        let ids: IndexSet<String> = match target {
            TranslateTarget::Placement(id) => std::iter::once(id.clone()).collect(),
            TranslateTarget::Group(ids) => ids.iter().cloned().collect(),
            TranslateTarget::All => self.placements().map(|p| p.id.clone()).collect(),
        };
        if let Some(missing) = ids.iter().find(|id| self.placement(id).is_none()) {
            return Err(IdfError::placement_not_found(missing.as_str()));
        }

        for id in &ids {
            if let Some(p) = self.placement_mut(id) {
                p.placement.x += dx;
                p.placement.y += dy;
            }
        }
        tracing::debug!(count = ids.len(), dx, dy, "translated placements");
        Ok(ids.len())
    }
}
