//! Automatic string placement on a column grid

use super::require_finite;
use crate::catalog::CellTypeCatalog;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::ComponentType;
use crate::strings::reconstruct;
use crate::types::{Transform2D, Vector2};

/// Extent of a rotated `length × width` rectangle along x and y
fn footprint(length: f64, width: f64, rotation: f64) -> (f64, f64) {
    let (sin, cos) = rotation.to_radians().sin_cos();
    (
        (length * cos).abs() + (width * sin).abs(),
        (length * sin).abs() + (width * cos).abs(),
    )
}

impl IdfDocument {
    /// Reposition the selected string placements into a non-overlapping
    /// grid.
    ///
    /// The grid starts at the board's lower-left corner plus
    /// `(offset_x, offset_y)`. Strings stack upwards in selection order,
    /// `offset_between` apart; when the next string would leave the board a
    /// new column starts to the right of the widest string so far.
    pub fn auto_layout(
        &mut self,
        offset_x: f64,
        offset_y: f64,
        offset_between: f64,
        ids: &[&str],
        catalog: &CellTypeCatalog,
    ) -> Result<()> {
        require_finite("offset_x", offset_x)?;
        require_finite("offset_y", offset_y)?;
        require_finite("offset_between", offset_between)?;
        if offset_between < 0.0 {
            return Err(IdfError::validation("offset_between", "must not be negative"));
        }
        let board = self
            .board()
            .and_then(|b| b.bounds())
            .ok_or_else(|| IdfError::validation("board", "document has no board outline"))?;

        let anchor = board.min + Vector2::new(offset_x, offset_y);
        let mut column_x = anchor.x;
        let mut column_width: f64 = 0.0;
        let mut cursor_y = anchor.y;
        let mut moves: Vec<(&str, Vector2)> = Vec::with_capacity(ids.len());

        for &id in ids {
            let placement = self.require_placement(id)?;
            if placement.component_type != ComponentType::String {
                return Err(IdfError::validation(
                    "ids",
                    format!("'{}' is a {}, only strings can be laid out", id, placement.component_type),
                ));
            }
            let outline = self.require_outline(&placement.name)?;
            let params = reconstruct(outline, catalog)?;
            let cell = catalog.require(&params.cell_type)?;
            let rotation = placement.placement.rotation;
            let (width, height) = footprint(params.span(cell), cell.width, rotation);

            if cursor_y > anchor.y && cursor_y + height > board.max.y {
                column_x += column_width + offset_between;
                column_width = 0.0;
                cursor_y = anchor.y;
            }

            // align the rotated outline's lower-left corner with the slot
            let local = outline.positions();
            let rotated = Transform2D::new(Vector2::ZERO, rotation)
                .apply_bounds(local.iter())
                .ok_or_else(|| IdfError::geometry(&outline.name, "outline has no points"))?;
            moves.push((id, Vector2::new(column_x, cursor_y) - rotated.min));

            cursor_y += height + offset_between;
            column_width = column_width.max(width);
        }

        let count = moves.len();
        for (id, origin) in moves {
            if let Some(p) = self.placement_mut(id) {
                p.placement.x = origin.x;
                p.placement.y = origin.y;
            }
        }
        tracing::info!(count, offset_x, offset_y, offset_between, "auto-laid out strings");
        Ok(())
    }
}
