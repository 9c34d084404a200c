//! IDF file writer
//!
//! Walks the section layout captured by the reader. Verbatim blocks pass
//! through unchanged and records equal to their parsed snapshot re-emit
//! their original lines; everything else is formatted fresh.

use super::format::{format_board, format_header, format_outline, format_placement};
use super::section::{LayoutEntry, PlacementFrame};
use crate::document::IdfDocument;
use crate::model::ComponentOutline;
use crate::types::Handle;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Where outlines added after reading are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    After(usize),
    Before(usize),
    End,
}

/// IDF file writer
pub struct IdfWriter<'a> {
    document: &'a IdfDocument,
}

impl<'a> IdfWriter<'a> {
    /// Create a writer for a document
    pub fn new(document: &'a IdfDocument) -> Self {
        Self { document }
    }

    /// Render the document as text
    pub fn write_to_string(&self) -> String {
        let source = &self.document.source;
        let lines = self.lines();
        let mut text = String::new();
        if source.bom {
            text.push('\u{feff}');
        }
        text.push_str(&lines.join(source.line_ending.as_str()));
        if source.trailing_newline && !lines.is_empty() {
            text.push_str(source.line_ending.as_str());
        }
        tracing::info!(lines = lines.len(), bytes = text.len(), "wrote IDF document");
        text
    }

    /// Render the document as bytes in its original encoding
    pub fn write_to_vec(&self) -> Vec<u8> {
        let text = self.write_to_string();
        match self.document.source.encoding {
            Some(encoding) => {
                let (bytes, _, _) = encoding.encode(&text);
                bytes.into_owned()
            }
            None => text.into_bytes(),
        }
    }

    /// Write the document to any writer
    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.write_to_vec())?;
        writer.flush()
    }

    fn lines(&self) -> Vec<String> {
        let doc = self.document;
        let source = &doc.source;

        let default_layout = [LayoutEntry::Header, LayoutEntry::Board, LayoutEntry::Placement];
        let layout: &[LayoutEntry] = if source.layout.is_empty() {
            &default_layout
        } else {
            &source.layout
        };

        let by_handle: HashMap<Handle, &ComponentOutline> =
            doc.outlines().map(|o| (o.handle, o)).collect();
        let placed: HashSet<Handle> = layout
            .iter()
            .filter_map(|entry| match entry {
                LayoutEntry::Outline(handle) => Some(*handle),
                _ => None,
            })
            .collect();
        let added: Vec<&ComponentOutline> = doc
            .outlines()
            .filter(|o| !placed.contains(&o.handle))
            .collect();

        let last_outline = layout
            .iter()
            .rposition(|e| matches!(e, LayoutEntry::Outline(_)));
        let placement_entry = layout.iter().position(|e| matches!(e, LayoutEntry::Placement));
        let insertion = match (last_outline, placement_entry) {
            (Some(i), _) => Insertion::After(i),
            (None, Some(i)) => Insertion::Before(i),
            (None, None) => Insertion::End,
        };

        let mut out = Vec::new();
        for (i, entry) in layout.iter().enumerate() {
            if insertion == Insertion::Before(i) {
                self.emit_added(&added, &mut out);
            }
            match entry {
                LayoutEntry::Verbatim(lines) => out.extend(lines.iter().cloned()),
                LayoutEntry::Header => match &source.header {
                    Some(lines) => out.extend(lines.iter().cloned()),
                    None => out.extend(format_header(&doc.header)),
                },
                LayoutEntry::Board => {
                    if let Some(board) = doc.board() {
                        match &source.board {
                            Some((snapshot, lines)) if snapshot == board => {
                                out.extend(lines.iter().cloned())
                            }
                            _ => out.extend(format_board(board)),
                        }
                    }
                }
                LayoutEntry::Outline(handle) => {
                    if let Some(outline) = by_handle.get(handle) {
                        self.emit_outline(outline, &mut out);
                    }
                }
                LayoutEntry::Placement => {
                    if source.placement_frame.is_some() || doc.placement_count() > 0 {
                        self.emit_placements(&mut out);
                    }
                }
            }
            if insertion == Insertion::After(i) {
                self.emit_added(&added, &mut out);
            }
        }
        if insertion == Insertion::End {
            self.emit_added(&added, &mut out);
        }
        if placement_entry.is_none() && doc.placement_count() > 0 {
            self.emit_placements(&mut out);
        }
        out
    }

    fn emit_added(&self, added: &[&ComponentOutline], out: &mut Vec<String>) {
        for outline in added {
            out.extend(format_outline(outline));
        }
    }

    fn emit_outline(&self, outline: &ComponentOutline, out: &mut Vec<String>) {
        match self.document.source.outlines.get(&outline.handle) {
            Some((snapshot, lines)) if snapshot == outline => out.extend(lines.iter().cloned()),
            _ => out.extend(format_outline(outline)),
        }
    }

    fn emit_placements(&self, out: &mut Vec<String>) {
        let source = &self.document.source;
        let default_frame = PlacementFrame {
            open: ".PLACEMENT".to_string(),
            close: ".END_PLACEMENT".to_string(),
            trailing: Vec::new(),
        };
        let frame = source.placement_frame.as_ref().unwrap_or(&default_frame);

        out.push(frame.open.clone());
        for placement in self.document.placements() {
            if let Some(original) = source.placements.get(&placement.handle) {
                out.extend(original.leading.iter().cloned());
                if &original.record == placement {
                    out.extend(original.lines.iter().cloned());
                    continue;
                }
            }
            out.extend(format_placement(placement));
        }
        out.extend(frame.trailing.iter().cloned());
        out.push(frame.close.clone());
    }
}

/// Render a document as text
pub fn serialize(document: &IdfDocument) -> String {
    IdfWriter::new(document).write_to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::idf::parse;
    use crate::model::{BoardOutline, ComponentPlacement, ComponentType, PlacementVector};

    const FILE: &str = "\
.HEADER
BOARD_FILE 3.0 \"IPTE TS1 1.0\" 2024/01/01.10:00:00 1
\"Demo\" MM
.END_HEADER
.BOARD_OUTLINE UNOWNED
3.2
0 0.0 0.0 0.0
0 0.0 -1600 0.0
0 -1000 -1600 0.0
0 -1000 0.0 0.0
0 0.0 0.0 0.0
.END_BOARD_OUTLINE
.ELECTRICAL
\"sbar_001\" BUSBAR MM 0.3
0 0 0 0
0 100 0 0
0 100 6 0
0 0 6 0
0 0 0 0
.END_ELECTRICAL
.PLACEMENT
# busbars
\"sbar_001\" BUSBAR BB001
-50 -20 0 0 TOP PLACED
.END_PLACEMENT
";

    #[test]
    fn test_unedited_roundtrip() {
        let doc = parse(FILE).unwrap();
        assert_eq!(serialize(&doc), FILE);
    }

    #[test]
    fn test_edited_placement_is_reformatted() {
        let mut doc = parse(FILE).unwrap();
        doc.placement_mut("BB001").unwrap().placement.x = -40.0;
        let text = serialize(&doc);
        assert!(text.contains("# busbars\n\"sbar_001\" BUSBAR BB001\n-40.0 -20.0 0.0 0.0 TOP PLACED\n"));
        // untouched sections keep their original text
        assert!(text.contains("0 0.0 -1600 0.0\n"));
        assert!(text.contains("0 100 6 0\n"));
    }

    #[test]
    fn test_new_outline_after_last_outline() {
        let mut doc = parse(FILE).unwrap();
        doc.add_outline(ComponentOutline::rectangle("sbar_002", 50.0, 6.0, 0.3))
            .unwrap();
        let text = serialize(&doc);
        let old = text.find("\"sbar_001\" BUSBAR MM 0.3").unwrap();
        let new = text.find("\"sbar_002\" BUSBAR MM 0.3").unwrap();
        let placement = text.find(".PLACEMENT").unwrap();
        assert!(old < new && new < placement);
    }

    #[test]
    fn test_document_without_source() {
        let mut doc = IdfDocument::new();
        doc.header.source_system = "IPTE TS1 1.0".to_string();
        doc.header.date = "2024/01/01.10:00:00".to_string();
        doc.header.board_name = "Demo".to_string();
        doc.set_board(BoardOutline::rectangle(10.0, 20.0, 1.0));
        doc.add_outline(ComponentOutline::rectangle("sbar_001", 5.0, 1.0, 0.3))
            .unwrap();
        doc.add_placement(ComponentPlacement::new(
            "BB001",
            "sbar_001",
            ComponentType::Busbar,
            PlacementVector::new(1.0, 2.0, 0.0),
        ))
        .unwrap();

        let text = serialize(&doc);
        assert!(text.starts_with(".HEADER\nBOARD_FILE 3.0 \"IPTE TS1 1.0\" 2024/01/01.10:00:00 1\n"));
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed.placement("BB001").unwrap().placement.y, 2.0);
        assert_eq!(serialize(&reparsed), text);
    }

    #[test]
    fn test_placement_section_created() {
        let text = FILE.replace(
            ".PLACEMENT\n# busbars\n\"sbar_001\" BUSBAR BB001\n-50 -20 0 0 TOP PLACED\n.END_PLACEMENT\n",
            "",
        );
        let mut doc = parse(&text).unwrap();
        doc.add_placement(ComponentPlacement::new(
            "BB001",
            "sbar_001",
            ComponentType::Busbar,
            PlacementVector::new(0.0, 0.0, 0.0),
        ))
        .unwrap();
        let out = serialize(&doc);
        assert!(out.ends_with(".PLACEMENT\n\"sbar_001\" BUSBAR BB001\n0.0 0.0 0.0 0.0 TOP PLACED\n.END_PLACEMENT\n"));
    }
}
