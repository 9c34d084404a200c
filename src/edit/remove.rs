//! Removing placements and outlines

use crate::document::IdfDocument;
use crate::error::{IdfError, Result};

impl IdfDocument {
    /// Delete a placement and its rotation history.
    ///
    /// The shared outline goes too when this was its last placement. Returns
    /// whether the outline was removed.
    pub fn remove_placement(&mut self, id: &str) -> Result<bool> {
        let placement = self
            .take_placement(id)
            .ok_or_else(|| IdfError::placement_not_found(id))?;
        let orphaned = self.placement_ids_of(&placement.name).is_empty();
        if orphaned {
            self.take_outline(&placement.name);
        }
        tracing::info!(id, name = %placement.name, outline_removed = orphaned, "removed placement");
        Ok(orphaned)
    }

    /// Delete an outline and every placement that uses it. Returns the
    /// number of placements removed.
    pub fn remove_outline(&mut self, name: &str) -> Result<usize> {
        self.require_outline(name)?;
        let ids: Vec<String> = self
            .placement_ids_of(name)
            .into_iter()
            .map(str::to_string)
            .collect();
        for id in &ids {
            self.take_placement(id);
        }
        self.take_outline(name);
        tracing::info!(name, placements = ids.len(), "removed outline");
        Ok(ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentOutline, ComponentPlacement, ComponentType, IdFamily, PlacementVector};

    fn doc() -> IdfDocument {
        let mut doc = IdfDocument::new();
        doc.add_outline(ComponentOutline::rectangle("sbar_001", 100.0, 6.0, 0.3))
            .unwrap();
        doc.add_outline(ComponentOutline::rectangle("String A", 100.0, 50.0, 0.0))
            .unwrap();
        for (id, name) in [("BB001", "sbar_001"), ("BB002", "sbar_001"), ("STR001", "String A")] {
            doc.add_placement(ComponentPlacement::new(
                id,
                name,
                ComponentType::classify(name),
                PlacementVector::new(0.0, 0.0, 0.0),
            ))
            .unwrap();
        }
        doc
    }

    #[test]
    fn test_shared_outline_survives_until_last_placement() {
        let mut doc = doc();
        assert!(!doc.remove_placement("BB001").unwrap());
        assert!(doc.outline("sbar_001").is_some());
        assert!(doc.history("BB001").is_none());
        assert!(doc.remove_placement("BB002").unwrap());
        assert!(doc.outline("sbar_001").is_none());
        assert_eq!(doc.is_busbar_raised("sbar_001"), None);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_remove_missing_placement() {
        let mut doc = doc();
        assert!(matches!(
            doc.remove_placement("BB009"),
            Err(IdfError::NotFound { .. })
        ));
        assert_eq!(doc.placement_count(), 3);
    }

    #[test]
    fn test_remove_outline_cascades() {
        let mut doc = doc();
        assert_eq!(doc.remove_outline("sbar_001").unwrap(), 2);
        assert_eq!(doc.placement_count(), 1);
        assert!(doc.busbar_names().is_empty());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut doc = doc();
        doc.remove_placement("BB002").unwrap();
        assert_eq!(doc.next_id(IdFamily::Busbar), "BB003");
    }
}
