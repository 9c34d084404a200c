//! Geometry model: typed records for boards, outlines and placements

mod board;
mod header;
mod history;
pub mod ids;
mod outline;
mod placement;

pub use board::BoardOutline;
pub use header::{IdfHeader, Units};
pub use history::AngleHistory;
pub use ids::{IdFamily, IdHighWater};
pub use outline::{close_polygon, ComponentOutline, OutlineSection, Vertex};
pub use placement::{ComponentPlacement, PlacementVector};

use std::fmt;

/// Component category, derived from the outline naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Rigid interconnection bar (`sbar_…`, `busbar_…`)
    Busbar,
    /// Row of solar cells (`String …`)
    String,
    /// Anything else the file contains
    Other,
}

impl ComponentType {
    /// Classify an outline by its name.
    ///
    /// Strings start with `String`; busbars start with `sbar` or `busbar`.
    /// Matching is case-insensitive.
    pub fn classify(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        if lower.starts_with("string") {
            ComponentType::String
        } else if lower.starts_with("sbar") || lower.starts_with("busbar") {
            ComponentType::Busbar
        } else {
            ComponentType::Other
        }
    }

    /// Lower-case label used in logs and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Busbar => "busbar",
            ComponentType::String => "string",
            ComponentType::Other => "other",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
