//! Parsed view of the `.HEADER` section

use std::fmt;

/// Length unit declared in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// Millimetres
    #[default]
    Millimeters,
    /// Thousandths of an inch
    Thou,
}

impl Units {
    /// Parse the header token
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "MM" => Some(Units::Millimeters),
            "THOU" => Some(Units::Thou),
            _ => None,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Millimeters => f.write_str("MM"),
            Units::Thou => f.write_str("THOU"),
        }
    }
}

/// Header fields. The header text itself is written back verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdfHeader {
    /// `BOARD_FILE` or `LIBRARY_FILE`
    pub file_type: String,
    /// IDF version (`3.0`)
    pub version: String,
    /// Source system identifier
    pub source_system: String,
    /// Creation timestamp as written
    pub date: String,
    /// Board or library name from the second record
    pub board_name: String,
    pub units: Units,
}
