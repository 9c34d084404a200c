//! Busbar height variants

use crate::config::BusbarSettings;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::ComponentType;

impl IdfDocument {
    /// Select the low or high height variant of a busbar. Returns `true`
    /// when the outline changed.
    pub fn set_busbar_raised(
        &mut self,
        name: &str,
        raised: bool,
        settings: &BusbarSettings,
    ) -> Result<bool> {
        let outline = self.require_outline(name)?;
        if outline.component_type != ComponentType::Busbar {
            return Err(IdfError::validation(
                "name",
                format!("'{}' is a {}, not a busbar", name, outline.component_type),
            ));
        }
        if self.is_busbar_raised(name) == Some(raised) {
            return Ok(false);
        }
        if let Some(outline) = self.outline_mut(name) {
            outline.height = settings.height_for(raised);
        }
        self.set_raised_flag(name, raised);
        tracing::debug!(name, raised, "changed busbar height");
        Ok(true)
    }

    /// Flip a busbar between its height variants and return the new state
    pub fn toggle_busbar_height(&mut self, name: &str, settings: &BusbarSettings) -> Result<bool> {
        let raised = !self.is_busbar_raised(name).unwrap_or(false);
        self.set_busbar_raised(name, raised, settings)?;
        Ok(raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentOutline;

    fn doc() -> IdfDocument {
        let mut doc = IdfDocument::new();
        doc.add_outline(ComponentOutline::rectangle("sbar_001", 100.0, 6.0, 0.3))
            .unwrap();
        doc.add_outline(ComponentOutline::rectangle("String A", 100.0, 6.0, 0.0))
            .unwrap();
        doc
    }

    #[test]
    fn test_raise_and_lower() {
        let settings = BusbarSettings::default();
        let mut doc = doc();
        assert!(doc.set_busbar_raised("sbar_001", true, &settings).unwrap());
        assert_eq!(doc.outline("sbar_001").unwrap().height, 0.8);
        assert!(!doc.set_busbar_raised("sbar_001", true, &settings).unwrap());
        assert!(!doc.toggle_busbar_height("sbar_001", &settings).unwrap());
        assert_eq!(doc.outline("sbar_001").unwrap().height, 0.3);
        assert_eq!(doc.is_busbar_raised("sbar_001"), Some(false));
    }

    #[test]
    fn test_footprint_unchanged() {
        let settings = BusbarSettings::default();
        let mut doc = doc();
        let before = doc.outline("sbar_001").unwrap().vertices.clone();
        doc.toggle_busbar_height("sbar_001", &settings).unwrap();
        assert_eq!(doc.outline("sbar_001").unwrap().vertices, before);
    }

    #[test]
    fn test_rejects_strings() {
        let settings = BusbarSettings::default();
        let mut doc = doc();
        assert!(matches!(
            doc.set_busbar_raised("String A", true, &settings),
            Err(IdfError::Validation { .. })
        ));
        assert!(matches!(
            doc.toggle_busbar_height("sbar_404", &settings),
            Err(IdfError::NotFound { .. })
        ));
    }
}
