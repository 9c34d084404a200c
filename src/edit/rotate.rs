//! Rotation about the component centre
//!
//! Callers always submit the full absolute angle of a component. The angle
//! actually applied is the difference to the last submitted value, kept
//! in the placement's [`AngleHistory`](crate::model::AngleHistory).

use super::require_finite;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::types::{is_zero_angle, normalize_angle, Vector2};

impl IdfDocument {
    /// Submit a new absolute angle for a placement and return the delta
    /// that was applied.
    ///
    /// The component turns about the centre of its outline's bounding box,
    /// so it stays in place on the board. The stored rotation is kept in
    /// `[0, 360)`.
    pub fn rotate(&mut self, id: &str, angle: f64) -> Result<f64> {
        require_finite("angle", angle)?;
        let placement = self.require_placement(id)?;
        let outline = self.require_outline(&placement.name)?;
        let center = outline
            .bounds()
            .map(|b| b.center())
            .unwrap_or(Vector2::ZERO);
        let current = placement.placement;

        let delta = self
            .history(id)
            .map(|h| h.delta_for(angle))
            .ok_or_else(|| IdfError::Consistency(format!("placement '{}' has no rotation history", id)))?;

        if !is_zero_angle(delta) {
            let pivot = current.transform().apply(center);
            let rotation = normalize_angle(current.rotation + delta);
            let origin = pivot - center.rotated(rotation);
            if let Some(p) = self.placement_mut(id) {
                p.placement.x = origin.x;
                p.placement.y = origin.y;
                p.placement.rotation = rotation;
            }
        }
        if let Some(history) = self.history_mut(id) {
            history.submit(angle);
        }

        tracing::debug!(id, angle, delta, "rotated placement");
        Ok(delta)
    }

    /// Apply several rotations in order; nothing is applied if any id is
    /// unknown
    pub fn rotate_many(&mut self, requests: &[(&str, f64)]) -> Result<Vec<f64>> {
        for (id, angle) in requests {
            require_finite("angle", *angle)?;
            self.require_placement(id)?;
        }
        requests
            .iter()
            .map(|(id, angle)| self.rotate(id, *angle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentOutline, ComponentPlacement, ComponentType, PlacementVector};

    fn doc() -> IdfDocument {
        let mut doc = IdfDocument::new();
        doc.add_outline(ComponentOutline::rectangle("sbar_001", 100.0, 6.0, 0.3))
            .unwrap();
        doc.add_placement(ComponentPlacement::new(
            "BB001",
            "sbar_001",
            ComponentType::Busbar,
            PlacementVector::new(200.0, 100.0, 0.0),
        ))
        .unwrap();
        doc
    }

    fn world_center(doc: &IdfDocument, id: &str) -> Vector2 {
        let p = doc.placement(id).unwrap();
        let c = doc.outline(&p.name).unwrap().bounds().unwrap().center();
        p.placement.transform().apply(c)
    }

    #[test]
    fn test_repeated_angle_applies_zero_delta() {
        let mut doc = doc();
        assert_eq!(doc.rotate("BB001", 90.0).unwrap(), 90.0);
        assert_eq!(doc.history("BB001").unwrap().entries(), vec![0.0, 90.0]);
        assert_eq!(doc.rotate("BB001", 90.0).unwrap(), 0.0);
        assert_eq!(doc.history("BB001").unwrap().entries(), vec![90.0, 90.0]);
        assert_eq!(doc.placement("BB001").unwrap().placement.rotation, 90.0);
    }

    #[test]
    fn test_rotation_keeps_center() {
        let mut doc = doc();
        let before = world_center(&doc, "BB001");
        doc.rotate("BB001", 90.0).unwrap();
        assert!(world_center(&doc, "BB001").approx_eq(&before, 1e-9));
        doc.rotate("BB001", 45.0).unwrap();
        assert!(world_center(&doc, "BB001").approx_eq(&before, 1e-9));
        assert_eq!(doc.placement("BB001").unwrap().placement.rotation, 45.0);
    }

    #[test]
    fn test_rotation_normalized() {
        let mut doc = doc();
        doc.rotate("BB001", -90.0).unwrap();
        assert_eq!(doc.placement("BB001").unwrap().placement.rotation, 270.0);
        doc.rotate("BB001", 360.0).unwrap();
        assert_eq!(doc.placement("BB001").unwrap().placement.rotation, 0.0);
    }

    #[test]
    fn test_rotate_many_is_atomic() {
        let mut doc = doc();
        let err = doc.rotate_many(&[("BB001", 90.0), ("BB999", 90.0)]).unwrap_err();
        assert!(matches!(err, IdfError::NotFound { .. }));
        assert_eq!(doc.placement("BB001").unwrap().placement.rotation, 0.0);
        assert_eq!(doc.history("BB001").unwrap().len(), 1);
    }
}
