//! Outline renames

use super::clean_name;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::ComponentType;

impl IdfDocument {
    /// Rename an outline and every placement that references it.
    ///
    /// The outline keeps its position in the registry. The new name must
    /// classify as the same component type and must not be taken.
    pub fn rename_outline(&mut self, old: &str, new: &str) -> Result<()> {
        let new = clean_name("name", new)?;
        let outline = self.require_outline(old)?;
        if old == new {
            return Ok(());
        }
        if self.outline(new).is_some() {
            return Err(IdfError::Consistency(format!(
                "cannot rename '{}': outline '{}' already exists",
                old, new
            )));
        }
        let new_type = ComponentType::classify(new);
        if new_type != outline.component_type {
            return Err(IdfError::validation(
                "name",
                format!(
                    "'{}' would turn {} '{}' into a {}",
                    new, outline.component_type, old, new_type
                ),
            ));
        }

        self.rekey_outline(old, new);
        tracing::info!(old, new, "renamed outline");
        Ok(())
    }

    /// Rename several string outlines; blank new names are skipped.
    ///
    /// The batch is applied as a whole or not at all.
    pub fn rename_strings<'a, I>(&mut self, renames: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut staged = self.clone();
        let mut count = 0;
        for (old, new) in renames {
            if new.trim().is_empty() {
                continue;
            }
            let outline = staged.require_outline(old)?;
            if outline.component_type != ComponentType::String {
                return Err(IdfError::validation(
                    "name",
                    format!("'{}' is not a string outline", old),
                ));
            }
            staged.rename_outline(old, new)?;
            count += 1;
        }
        *self = staged;
        Ok(count)
    }
}
