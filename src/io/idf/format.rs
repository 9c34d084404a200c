//! Record formatting for new or edited records

use super::tokenizer::quote_if_needed;
use crate::model::{BoardOutline, ComponentOutline, ComponentPlacement, IdfHeader, Vertex};

/// Format a coordinate: six decimals, trailing zeros trimmed, at least one
/// decimal digit
pub fn format_number(value: f64) -> String {
    let mut text = format!("{:.6}", value);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    if text == "-0.0" {
        text = "0.0".to_string();
    }
    text
}

/// `loop x y angle`
pub fn format_vertex(vertex: &Vertex) -> String {
    format!(
        "{} {} {} {}",
        vertex.loop_label,
        format_number(vertex.x),
        format_number(vertex.y),
        format_number(vertex.angle)
    )
}

/// Header section written for documents that were not read from a file
pub fn format_header(header: &IdfHeader) -> Vec<String> {
    let file_type = if header.file_type.is_empty() {
        "BOARD_FILE"
    } else {
        header.file_type.as_str()
    };
    let version = if header.version.is_empty() {
        "3.0"
    } else {
        header.version.as_str()
    };
    vec![
        ".HEADER".to_string(),
        format!(
            "{} {} \"{}\" {} 1",
            file_type,
            version,
            header.source_system,
            quote_if_needed(&header.date)
        ),
        format!("\"{}\" {}", header.board_name, header.units),
        ".END_HEADER".to_string(),
    ]
}

/// Complete `.BOARD_OUTLINE` section
pub fn format_board(board: &BoardOutline) -> Vec<String> {
    let mut lines = Vec::with_capacity(board.vertices.len() + 3);
    if board.owner.is_empty() {
        lines.push(".BOARD_OUTLINE".to_string());
    } else {
        lines.push(format!(".BOARD_OUTLINE {}", board.owner));
    }
    lines.push(format_number(board.thickness));
    lines.extend(board.vertices.iter().map(format_vertex));
    lines.push(".END_BOARD_OUTLINE".to_string());
    lines
}

/// Complete `.ELECTRICAL` / `.MECHANICAL` section
pub fn format_outline(outline: &ComponentOutline) -> Vec<String> {
    let keyword = outline.section.keyword();
    let mut lines = Vec::with_capacity(outline.vertices.len() + 3);
    lines.push(format!(".{}", keyword));
    lines.push(format!(
        "\"{}\" {} {} {}",
        outline.name,
        quote_if_needed(&outline.part_number),
        outline.units,
        format_number(outline.height)
    ));
    lines.extend(outline.vertices.iter().map(format_vertex));
    lines.push(format!(".END_{}", keyword));
    lines
}

/// The two lines of a placement record
pub fn format_placement(placement: &ComponentPlacement) -> [String; 2] {
    let v = &placement.placement;
    [
        format!(
            "\"{}\" {} {}",
            placement.name,
            quote_if_needed(&placement.part_number),
            quote_if_needed(&placement.id)
        ),
        format!(
            "{} {} {} {} {} {}",
            format_number(v.x),
            format_number(v.y),
            format_number(v.offset),
            format_number(v.rotation),
            placement.side,
            placement.status
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentType, PlacementVector};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(-0.0), "0.0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-182.0), "-182.0");
        assert_eq!(format_number(1.23456789), "1.234568");
        assert_eq!(format_number(-1e-9), "0.0");
        assert_eq!(format_number(100.000001), "100.000001");
    }

    #[test]
    fn test_format_outline() {
        let outline = ComponentOutline::rectangle("sbar_001", 10.0, 6.0, 0.3);
        let lines = format_outline(&outline);
        assert_eq!(lines[0], ".ELECTRICAL");
        assert_eq!(lines[1], "\"sbar_001\" BUSBAR MM 0.3");
        assert_eq!(lines[2], "0 0.0 0.0 0.0");
        assert_eq!(lines[3], "0 10.0 0.0 0.0");
        assert_eq!(lines.last().unwrap(), ".END_ELECTRICAL");
    }

    #[test]
    fn test_format_placement() {
        let p = ComponentPlacement::new(
            "STR004",
            "String M10 3 Cells 2mm +10mm -10mm",
            ComponentType::String,
            PlacementVector::new(-10.5, 20.0, 90.0),
        );
        let [first, second] = format_placement(&p);
        assert_eq!(first, "\"String M10 3 Cells 2mm +10mm -10mm\" STRING STR004");
        assert_eq!(second, "-10.5 20.0 0.0 90.0 TOP PLACED");
    }

    #[test]
    fn test_format_board() {
        let board = BoardOutline::rectangle(1000.0, 1600.0, 3.2);
        let lines = format_board(&board);
        assert_eq!(lines[0], ".BOARD_OUTLINE UNOWNED");
        assert_eq!(lines[1], "3.2");
        assert_eq!(lines[3], "0 0.0 -1600.0 0.0");
        assert_eq!(lines.len(), 8);
    }
}
