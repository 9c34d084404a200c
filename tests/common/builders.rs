//! Sample board file builders.
//!
//! `IdfTextBuilder` writes the text a panel layout tool would produce so
//! tests can exercise the reader on files that were not written by this
//! crate's serializer.

#![allow(dead_code)]

use super::{catalog, sample_string};
use idfrust::io::idf::format_number;
use idfrust::strings::generate;
use idfrust::{StringParameters, Vertex};

#[derive(Debug, Clone)]
enum Block {
    Board { width: f64, length: f64 },
    Outline { keyword: &'static str, name: String, part: String, height: f64, vertices: Vec<Vertex> },
    Raw(Vec<String>),
    Placements(Vec<(String, String, [f64; 4])>),
}

#[derive(Debug, Clone)]
pub struct IdfTextBuilder {
    name: String,
    blocks: Vec<Block>,
    crlf: bool,
}

impl IdfTextBuilder {
    pub fn new(name: &str) -> Self {
        IdfTextBuilder {
            name: name.to_string(),
            blocks: Vec::new(),
            crlf: false,
        }
    }

    /// Board outline with its origin corner at (0, 0), extending to -x/-y
    pub fn board(mut self, width: f64, length: f64) -> Self {
        self.blocks.push(Block::Board { width, length });
        self
    }

    pub fn busbar(mut self, name: &str, length: f64, width: f64, height: f64) -> Self {
        let vertices = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(length, 0.0),
            Vertex::new(length, width),
            Vertex::new(0.0, width),
            Vertex::new(0.0, 0.0),
        ];
        self.blocks.push(Block::Outline {
            keyword: "ELECTRICAL",
            name: name.to_string(),
            part: "BUSBAR".to_string(),
            height,
            vertices,
        });
        self
    }

    pub fn string(mut self, name: &str, params: &StringParameters, ordinal: usize) -> Self {
        let vertices = match generate(params, &catalog(), Some(ordinal)) {
            Ok(v) => v,
            Err(e) => panic!("bad sample parameters: {e}"),
        };
        self.blocks.push(Block::Outline {
            keyword: "ELECTRICAL",
            name: name.to_string(),
            part: "STRING".to_string(),
            height: 0.0,
            vertices,
        });
        self
    }

    /// Lines copied into the file as they are
    pub fn raw(mut self, lines: &[&str]) -> Self {
        self.blocks
            .push(Block::Raw(lines.iter().map(|l| l.to_string()).collect()));
        self
    }

    /// `(name, id, [x, y, offset, rotation])` records
    pub fn placements(mut self, records: &[(&str, &str, [f64; 4])]) -> Self {
        self.blocks.push(Block::Placements(
            records
                .iter()
                .map(|(name, id, v)| (name.to_string(), id.to_string(), *v))
                .collect(),
        ));
        self
    }

    pub fn crlf(mut self) -> Self {
        self.crlf = true;
        self
    }

    pub fn build(&self) -> String {
        let mut lines = vec![
            ".HEADER".to_string(),
            "BOARD_FILE 3.0 \"IPTE TS1 1.0\" 2024/03/18.09:30:00 1".to_string(),
            format!("\"{}\" MM", self.name),
            ".END_HEADER".to_string(),
        ];
        for block in &self.blocks {
            match block {
                Block::Board { width, length } => {
                    lines.push(".BOARD_OUTLINE UNOWNED".to_string());
                    lines.push("3.2".to_string());
                    for (x, y) in [(0.0, 0.0), (0.0, -*length), (-*width, -*length), (-*width, 0.0), (0.0, 0.0)] {
                        lines.push(format!("0 {} {} 0.0", format_number(x), format_number(y)));
                    }
                    lines.push(".END_BOARD_OUTLINE".to_string());
                }
                Block::Outline { keyword, name, part, height, vertices } => {
                    lines.push(format!(".{}", keyword));
                    lines.push(format!("\"{}\" {} MM {}", name, part, format_number(*height)));
                    for v in vertices {
                        lines.push(format!("0 {} {} 0.0", format_number(v.x), format_number(v.y)));
                    }
                    lines.push(format!(".END_{}", keyword));
                }
                Block::Raw(raw) => lines.extend(raw.iter().cloned()),
                Block::Placements(records) => {
                    lines.push(".PLACEMENT".to_string());
                    for (name, id, [x, y, offset, rotation]) in records {
                        let part = if name.starts_with("String") { "STRING" } else { "BUSBAR" };
                        lines.push(format!("\"{}\" {} {}", name, part, id));
                        lines.push(format!(
                            "{} {} {} {} TOP PLACED",
                            format_number(*x),
                            format_number(*y),
                            format_number(*offset),
                            format_number(*rotation)
                        ));
                    }
                    lines.push(".END_PLACEMENT".to_string());
                }
            }
        }
        let ending = if self.crlf { "\r\n" } else { "\n" };
        let mut text = lines.join(ending);
        text.push_str(ending);
        text
    }
}

/// A 1000 x 1600 mm panel with two busbars sharing one outline, one string
/// placed twice and a second string placed once
pub fn sample_panel() -> IdfTextBuilder {
    let params = sample_string();
    let short = StringParameters::new("M10", 3, 2.5, 10.0, 7.0);
    IdfTextBuilder::new("Demo // PV-1")
        .board(1000.0, 1600.0)
        .busbar("sbar_001", 182.0, 6.0, 0.3)
        .string("String A", &params, 1)
        .string("String B", &short, 2)
        .placements(&[
            ("sbar_001", "BB001", [-900.0, -100.0, 0.0, 0.0]),
            ("sbar_001", "BB002", [-900.0, -1500.0, 0.0, 0.0]),
            ("String A", "STR001", [-900.0, -300.0, 0.0, 0.0]),
            ("String A", "STR002", [-900.0, -600.0, 0.0, 0.0]),
            ("String B", "STR003", [-900.0, -900.0, 0.0, 90.0]),
        ])
}
