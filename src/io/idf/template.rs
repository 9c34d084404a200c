//! Blank board files

use super::writer::serialize;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::{BoardOutline, Units};

/// Source system written into new board headers
pub const SOURCE_SYSTEM: &str = "IPTE TS1 1.0";

/// Build the text of a new board file: a header naming the project and
/// module, and a rectangular glass outline from `(0, 0)` to
/// `(-width, -length)`.
///
/// `timestamp` is written as given; callers use `YYYY/MM/DD.HH:MM:SS`.
pub fn new_board_file(
    project: &str,
    module_nr: &str,
    width: f64,
    length: f64,
    thickness: f64,
    timestamp: &str,
) -> Result<String> {
    for (parameter, value) in [("width", width), ("length", length), ("thickness", thickness)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(IdfError::validation(parameter, "must be greater than zero"));
        }
    }
    if project.contains('"') || module_nr.contains('"') {
        return Err(IdfError::validation("project", "names cannot contain double quotes"));
    }

    let mut document = IdfDocument::new();
    document.header.file_type = "BOARD_FILE".to_string();
    document.header.version = "3.0".to_string();
    document.header.source_system = SOURCE_SYSTEM.to_string();
    document.header.date = timestamp.to_string();
    document.header.board_name = format!("{} // PV-{}", project, module_nr);
    document.header.units = Units::Millimeters;
    document.set_board(BoardOutline::rectangle(width, length, thickness));

    tracing::info!(project, module_nr, width, length, "created blank board file");
    Ok(serialize(&document))
}
