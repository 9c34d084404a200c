//! Section markers and the source layout kept for reserialization

use crate::model::{BoardOutline, ComponentOutline, ComponentPlacement};
use crate::types::Handle;
use encoding_rs::Encoding;
use std::collections::HashMap;

/// IDF section kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    BoardOutline,
    Electrical,
    Mechanical,
    Placement,
    /// Any other section; kept verbatim
    Other(String),
}

impl SectionKind {
    /// Kind for a marker keyword without the leading dot
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "HEADER" => SectionKind::Header,
            "BOARD_OUTLINE" => SectionKind::BoardOutline,
            "ELECTRICAL" => SectionKind::Electrical,
            "MECHANICAL" => SectionKind::Mechanical,
            "PLACEMENT" => SectionKind::Placement,
            _ => SectionKind::Other(keyword.to_string()),
        }
    }

    /// Marker keyword without the leading dot
    pub fn keyword(&self) -> &str {
        match self {
            SectionKind::Header => "HEADER",
            SectionKind::BoardOutline => "BOARD_OUTLINE",
            SectionKind::Electrical => "ELECTRICAL",
            SectionKind::Mechanical => "MECHANICAL",
            SectionKind::Placement => "PLACEMENT",
            SectionKind::Other(name) => name,
        }
    }

    /// Section name as shown in error messages (`.PLACEMENT`)
    pub fn display_name(&self) -> String {
        format!(".{}", self.keyword())
    }

    /// Closing marker (`.END_PLACEMENT`)
    pub fn end_marker(&self) -> String {
        format!(".END_{}", self.keyword())
    }
}

/// A section marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'a> {
    /// `.NAME [rest]`
    Start { keyword: &'a str, rest: &'a str },
    /// `.END_NAME`
    End { keyword: &'a str },
}

/// Recognize a section marker; `None` for data lines
pub fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let trimmed = line.trim();
    let body = trimmed.strip_prefix('.')?;
    let (word, rest) = match body.find(char::is_whitespace) {
        Some(pos) => (&body[..pos], body[pos..].trim()),
        None => (body, ""),
    };
    if word.is_empty() {
        return None;
    }
    if word.len() > 4 && word[..4].eq_ignore_ascii_case("END_") {
        Some(Marker::End { keyword: &word[4..] })
    } else {
        Some(Marker::Start { keyword: word, rest })
    }
}

/// True for lines that carry no record (blank or `#` comment)
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Line terminator detected in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One block of the file in source order
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEntry {
    /// Lines passed through unchanged (comments, unknown sections)
    Verbatim(Vec<String>),
    Header,
    Board,
    Outline(Handle),
    Placement,
}

/// Original text of a placement record
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSource {
    /// Record as parsed; the lines are reused while it is unchanged
    pub record: ComponentPlacement,
    /// Comment lines directly above the record
    pub leading: Vec<String>,
    pub lines: Vec<String>,
}

/// Marker and trailing lines of the placement section
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementFrame {
    pub open: String,
    pub close: String,
    /// Comment lines after the last record
    pub trailing: Vec<String>,
}

/// Everything the writer needs to reproduce unedited parts byte for byte
#[derive(Debug, Clone)]
pub struct SourceText {
    pub layout: Vec<LayoutEntry>,
    pub header: Option<Vec<String>>,
    pub board: Option<(BoardOutline, Vec<String>)>,
    pub outlines: HashMap<Handle, (ComponentOutline, Vec<String>)>,
    pub placement_frame: Option<PlacementFrame>,
    pub placements: HashMap<Handle, PlacementSource>,
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
    /// The text started with a byte-order mark
    pub bom: bool,
    /// Legacy encoding the file was decoded with, if not UTF-8
    pub encoding: Option<&'static Encoding>,
}

impl Default for SourceText {
    fn default() -> Self {
        SourceText {
            layout: Vec::new(),
            header: None,
            board: None,
            outlines: HashMap::new(),
            placement_frame: None,
            placements: HashMap::new(),
            line_ending: LineEnding::Lf,
            trailing_newline: true,
            bom: false,
            encoding: None,
        }
    }
}
