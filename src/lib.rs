//! # idfrust
//!
//! Reading, editing and writing solar-panel interconnection layouts stored
//! as IDF 3.0 board files.
//!
//! A layout is a board outline plus busbar and cell-string components. Each
//! component has a shared polygon outline (keyed by name) and any number of
//! placements (keyed by a `BBnnn` / `STRnnn` id).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idfrust::{CellTypeCatalog, IdfReader, IdfWriter, TranslateTarget};
//!
//! let mut doc = IdfReader::from_bytes(&std::fs::read("panel.idf")?).read()?;
//!
//! let catalog = CellTypeCatalog::standard();
//! for (name, meta) in doc.string_metadata(&catalog)? {
//!     println!("{}: {} x {}", name, meta.nr_cells, meta.cell_type);
//! }
//!
//! doc.translate(&TranslateTarget::All, 5.0, 0.0)?;
//! doc.rotate("STR001", 90.0)?;
//!
//! let text = IdfWriter::new(&doc).write_to_string();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::idf`] - parser and source-preserving serializer
//! - [`IdfDocument`] - the layout model; every edit is a method on it
//! - [`strings`] - string outline generation and parameter reconstruction
//! - [`diff`] - unified diff between original and edited text
//!
//! Unedited records are written back byte for byte, so the diff of an edit
//! shows only the records it touched.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod diff;
pub mod document;
pub mod edit;
pub mod error;
pub mod io;
pub mod model;
pub mod notification;
pub mod strings;
pub mod types;

// Re-export commonly used types
pub use error::{IdfError, Result};
pub use types::{BoundingBox2D, Handle, Transform2D, Vector2};

// Re-export model types
pub use model::{
    AngleHistory, BoardOutline, ComponentOutline, ComponentPlacement, ComponentType, IdFamily,
    IdfHeader, PlacementVector, Units, Vertex,
};

// Re-export the engine
pub use catalog::{CellType, CellTypeCatalog};
pub use config::{BusbarSettings, EditorConfiguration};
pub use diff::{diff, DiffLine, DiffLineKind};
pub use document::IdfDocument;
pub use edit::{BusbarSpec, TranslateTarget};
pub use strings::{StringMetadata, StringParameters};

// Re-export I/O types
pub use io::idf::{parse, serialize, IdfReader, IdfReaderConfiguration, IdfWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_document_creation() {
        let doc = IdfDocument::new();
        assert!(doc.board().is_none());
        assert_eq!(doc.placement_count(), 0);
    }
}
