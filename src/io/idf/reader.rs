//! IDF file reader

use super::section::{
    is_comment, parse_marker, LayoutEntry, LineEnding, Marker, PlacementFrame, PlacementSource,
    SectionKind,
};
use super::tokenizer::{tokenize, Token};
use crate::config::BusbarSettings;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::{
    BoardOutline, ComponentOutline, ComponentPlacement, ComponentType, OutlineSection,
    PlacementVector, Units, Vertex,
};
use crate::notification::NotificationType;
use encoding_rs::{Encoding, WINDOWS_1252};

/// Configuration for the IDF reader.
#[derive(Debug, Clone)]
pub struct IdfReaderConfiguration {
    /// When `true`, outlines that are neither busbars nor strings abort the
    /// read instead of being reported as notifications.
    ///
    /// Default: `false`.
    pub strict_classification: bool,

    /// Heights used to derive the initial raised flag of each busbar
    pub busbar: BusbarSettings,
}

impl Default for IdfReaderConfiguration {
    fn default() -> Self {
        Self {
            strict_classification: false,
            busbar: BusbarSettings::default(),
        }
    }
}

/// One source line with its 1-based number
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// Placement waiting for every outline to be known
struct PendingPlacement {
    placement: ComponentPlacement,
    leading: Vec<String>,
    lines: Vec<String>,
    number: usize,
}

/// IDF file reader
pub struct IdfReader {
    text: String,
    encoding: Option<&'static Encoding>,
    config: IdfReaderConfiguration,
}

impl IdfReader {
    /// Create a reader over raw file bytes.
    ///
    /// UTF-8 is tried first; anything else is decoded as Windows-1252.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (text, encoding) = match std::str::from_utf8(bytes) {
            Ok(text) => (text.to_string(), None),
            Err(_) => {
                let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                (decoded.into_owned(), Some(WINDOWS_1252))
            }
        };
        Self {
            text,
            encoding,
            config: IdfReaderConfiguration::default(),
        }
    }

    /// Create a reader over decoded text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self {
            text: text.to_string(),
            encoding: None,
            config: IdfReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: IdfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the file and return an IdfDocument
    pub fn read(self) -> Result<IdfDocument> {
        let mut document = IdfDocument::new();

        if let Some(encoding) = self.encoding {
            tracing::warn!(encoding = encoding.name(), "input is not UTF-8, decoded with fallback");
            document.notifications.notify(
                NotificationType::Warning,
                format!("input is not valid UTF-8; decoded as {}", encoding.name()),
            );
        }

        let (body, bom) = match self.text.strip_prefix('\u{feff}') {
            Some(rest) => (rest, true),
            None => (self.text.as_str(), false),
        };
        let line_ending = if body.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        let trailing_newline = body.ends_with('\n');

        let mut raw: Vec<&str> = body.split('\n').collect();
        if trailing_newline {
            raw.pop();
        }
        let lines: Vec<Line<'_>> = raw
            .into_iter()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text: if line_ending == LineEnding::CrLf {
                    text.strip_suffix('\r').unwrap_or(text)
                } else {
                    text
                },
            })
            .collect();

        let mut state = ReadState {
            document: &mut document,
            config: &self.config,
            pending_comments: Vec::new(),
            pending_placements: Vec::new(),
            seen_header: false,
        };
        state.read_lines(&lines)?;
        state.finish()?;

        document.source.line_ending = line_ending;
        document.source.trailing_newline = trailing_newline;
        document.source.bom = bom;
        document.source.encoding = self.encoding;

        tracing::info!(
            outlines = document.outline_count(),
            placements = document.placement_count(),
            notifications = document.notifications.len(),
            "read IDF document"
        );
        Ok(document)
    }
}

/// Parse IDF text with the default configuration
pub fn parse(text: &str) -> Result<IdfDocument> {
    IdfReader::from_str(text).read()
}

struct ReadState<'d, 'c> {
    document: &'d mut IdfDocument,
    config: &'c IdfReaderConfiguration,
    /// Comment lines waiting to become a verbatim layout entry
    pending_comments: Vec<String>,
    pending_placements: Vec<PendingPlacement>,
    seen_header: bool,
}

impl<'d, 'c> ReadState<'d, 'c> {
    fn read_lines(&mut self, lines: &[Line<'_>]) -> Result<()> {
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            match parse_marker(line.text) {
                None if is_comment(line.text) => {
                    self.pending_comments.push(line.text.to_string());
                    i += 1;
                }
                None => {
                    return Err(IdfError::parse(
                        "(top level)",
                        line.number,
                        line.text.trim(),
                        "record outside of any section",
                    ))
                }
                Some(Marker::End { keyword }) => {
                    return Err(IdfError::parse(
                        "(top level)",
                        line.number,
                        format!(".END_{}", keyword),
                        "end marker without an open section",
                    ))
                }
                Some(Marker::Start { keyword, rest }) => {
                    let kind = SectionKind::from_keyword(keyword);
                    let end = find_section_end(lines, i, &kind)?;
                    if !self.seen_header && kind != SectionKind::Header {
                        return Err(IdfError::parse(
                            kind.display_name(),
                            line.number,
                            line.text.trim(),
                            "file must start with a .HEADER section",
                        ));
                    }
                    self.flush_comments();
                    let section = &lines[i..=end];
                    tracing::debug!(section = %kind.display_name(), line = line.number, "reading section");
                    match kind {
                        SectionKind::Header => self.read_header(section)?,
                        SectionKind::BoardOutline => self.read_board(section, rest)?,
                        SectionKind::Electrical => {
                            self.read_outline(section, OutlineSection::Electrical)?
                        }
                        SectionKind::Mechanical => {
                            self.read_outline(section, OutlineSection::Mechanical)?
                        }
                        SectionKind::Placement => self.read_placements(section)?,
                        SectionKind::Other(ref name) => self.retain_section(section, name),
                    }
                    i = end + 1;
                }
            }
        }
        self.flush_comments();
        if !self.seen_header {
            return Err(IdfError::parse(
                ".HEADER",
                lines.len(),
                "",
                "missing .HEADER section",
            ));
        }
        Ok(())
    }

    fn flush_comments(&mut self) {
        if !self.pending_comments.is_empty() {
            let lines = std::mem::take(&mut self.pending_comments);
            self.document.source.layout.push(LayoutEntry::Verbatim(lines));
        }
    }

    fn read_header(&mut self, section: &[Line<'_>]) -> Result<()> {
        let name = SectionKind::Header.display_name();
        if self.seen_header {
            return Err(IdfError::parse(
                &name,
                section[0].number,
                section[0].text.trim(),
                "duplicate .HEADER section",
            ));
        }
        self.seen_header = true;

        let records = records(section, &name)?;
        let Some((first_line, first)) = records.first() else {
            return Err(IdfError::parse(&name, section[0].number, "", "empty header"));
        };
        if first.len() < 4 {
            return Err(IdfError::parse(
                &name,
                *first_line,
                joined(first),
                "expected file type, version, source system and date",
            ));
        }
        let file_type = first[0].text.to_ascii_uppercase();
        if file_type != "BOARD_FILE" && file_type != "LIBRARY_FILE" {
            return Err(IdfError::parse(
                &name,
                *first_line,
                first[0].text,
                "expected BOARD_FILE or LIBRARY_FILE",
            ));
        }
        number(&first[1], &name, *first_line)?;

        let Some((second_line, second)) = records.get(1) else {
            return Err(IdfError::parse(
                &name,
                section[section.len() - 1].number,
                "",
                "missing board name and units record",
            ));
        };
        if second.len() != 2 {
            return Err(IdfError::parse(
                &name,
                *second_line,
                joined(second),
                "expected board name and units",
            ));
        }
        let units = Units::from_token(second[1].text).ok_or_else(|| {
            IdfError::parse(&name, *second_line, second[1].text, "expected MM or THOU")
        })?;

        let header = &mut self.document.header;
        header.file_type = file_type;
        header.version = first[1].text.to_string();
        header.source_system = first[2].text.to_string();
        header.date = first[3].text.to_string();
        header.board_name = second[0].text.to_string();
        header.units = units;

        self.document.source.header = Some(owned(section));
        self.document.source.layout.push(LayoutEntry::Header);
        Ok(())
    }

    fn read_board(&mut self, section: &[Line<'_>], owner: &str) -> Result<()> {
        let name = SectionKind::BoardOutline.display_name();
        if self.document.board().is_some() {
            return Err(IdfError::parse(
                &name,
                section[0].number,
                section[0].text.trim(),
                "duplicate .BOARD_OUTLINE section",
            ));
        }
        let records = records(section, &name)?;
        let Some((thickness_line, thickness)) = records.first() else {
            return Err(IdfError::parse(&name, section[0].number, "", "missing thickness record"));
        };
        if thickness.len() != 1 {
            return Err(IdfError::parse(
                &name,
                *thickness_line,
                joined(thickness),
                "expected a single thickness value",
            ));
        }
        let thickness = number(&thickness[0], &name, *thickness_line)?;
        let mut vertices = vertices(&records[1..], &name, section)?;
        crate::model::close_polygon(&mut vertices);

        let board = BoardOutline {
            handle: self.document.allocate_handle(),
            owner: owner.to_string(),
            thickness,
            vertices,
        };
        self.document.set_board(board.clone());
        self.document.source.board = Some((board, owned(section)));
        self.document.source.layout.push(LayoutEntry::Board);
        Ok(())
    }

    fn read_outline(&mut self, section: &[Line<'_>], kind: OutlineSection) -> Result<()> {
        let name = format!(".{}", kind.keyword());
        let records = records(section, &name)?;
        let Some((header_line, header)) = records.first() else {
            return Err(IdfError::parse(&name, section[0].number, "", "missing outline header record"));
        };
        if header.len() != 4 {
            return Err(IdfError::parse(
                &name,
                *header_line,
                joined(header),
                "expected name, part number, units and height",
            ));
        }
        let outline_name = header[0].text;
        if self.document.outline(outline_name).is_some() {
            return Err(IdfError::parse(
                &name,
                *header_line,
                outline_name,
                "duplicate outline name",
            ));
        }
        if Units::from_token(header[2].text).is_none() {
            return Err(IdfError::parse(&name, *header_line, header[2].text, "expected MM or THOU"));
        }
        let height = number(&header[3], &name, *header_line)?;
        let vertices = vertices(&records[1..], &name, section)?;

        let mut outline = ComponentOutline::new(outline_name, height, vertices);
        outline.handle = self.document.allocate_handle();
        outline.section = kind;
        outline.part_number = header[1].text.to_string();
        outline.units = header[2].text.to_string();

        if outline.component_type == ComponentType::Other {
            if self.config.strict_classification {
                return Err(IdfError::parse(
                    &name,
                    *header_line,
                    outline_name,
                    "outline is neither a busbar nor a string",
                ));
            }
            self.document.notifications.notify(
                NotificationType::Unclassified,
                format!("outline '{}' is neither a busbar nor a string", outline_name),
            );
        }

        let handle = outline.handle;
        self.document
            .source
            .outlines
            .insert(handle, (outline.clone(), owned(section)));
        self.document.add_outline(outline)?;
        self.document.source.layout.push(LayoutEntry::Outline(handle));
        Ok(())
    }

    fn read_placements(&mut self, section: &[Line<'_>]) -> Result<()> {
        let name = SectionKind::Placement.display_name();
        if self.document.source.placement_frame.is_some() {
            return Err(IdfError::parse(
                &name,
                section[0].number,
                section[0].text.trim(),
                "duplicate .PLACEMENT section",
            ));
        }

        let body = &section[1..section.len() - 1];
        let mut leading: Vec<String> = Vec::new();
        let mut i = 0;
        while i < body.len() {
            let line = body[i];
            if is_comment(line.text) {
                leading.push(line.text.to_string());
                i += 1;
                continue;
            }
            let Some(next) = body.get(i + 1) else {
                return Err(IdfError::parse(
                    &name,
                    line.number,
                    line.text.trim(),
                    "placement record is missing its position line",
                ));
            };
            let first = fields(line, &name)?;
            let second = fields(*next, &name)?;
            if first.len() != 3 {
                return Err(IdfError::parse(
                    &name,
                    line.number,
                    line.text.trim(),
                    "expected name, part number and reference designator",
                ));
            }
            if second.len() != 6 {
                return Err(IdfError::parse(
                    &name,
                    next.number,
                    next.text.trim(),
                    "expected x, y, offset, rotation, side and status",
                ));
            }
            let vector = PlacementVector {
                x: number(&second[0], &name, next.number)?,
                y: number(&second[1], &name, next.number)?,
                offset: number(&second[2], &name, next.number)?,
                rotation: number(&second[3], &name, next.number)?,
            };
            let mut placement = ComponentPlacement::new(
                first[2].text,
                first[0].text,
                ComponentType::classify(first[0].text),
                vector,
            );
            placement.part_number = first[1].text.to_string();
            placement.side = second[4].text.to_string();
            placement.status = second[5].text.to_string();

            let duplicate = self.document.placement(&placement.id).is_some()
                || self
                    .pending_placements
                    .iter()
                    .any(|p| p.placement.id == placement.id);
            if duplicate {
                return Err(IdfError::parse(
                    &name,
                    line.number,
                    first[2].text,
                    "duplicate placement id",
                ));
            }

            self.pending_placements.push(PendingPlacement {
                placement,
                leading: std::mem::take(&mut leading),
                lines: vec![line.text.to_string(), next.text.to_string()],
                number: line.number,
            });
            i += 2;
        }

        self.document.source.placement_frame = Some(PlacementFrame {
            open: section[0].text.to_string(),
            close: section[section.len() - 1].text.to_string(),
            trailing: leading,
        });
        self.document.source.layout.push(LayoutEntry::Placement);
        Ok(())
    }

    fn retain_section(&mut self, section: &[Line<'_>], name: &str) {
        tracing::warn!(section = name, line = section[0].number, "retaining unknown section verbatim");
        self.document.notifications.notify(
            NotificationType::Retained,
            format!("unknown section .{} retained verbatim", name),
        );
        self.document
            .source
            .layout
            .push(LayoutEntry::Verbatim(owned(section)));
    }

    /// Resolve placements against the complete outline registry and derive
    /// busbar height flags
    fn finish(&mut self) -> Result<()> {
        let name = SectionKind::Placement.display_name();
        for pending in std::mem::take(&mut self.pending_placements) {
            let id = pending.placement.id.clone();
            if self.document.outline(&pending.placement.name).is_none() {
                return Err(IdfError::parse(
                    &name,
                    pending.number,
                    pending.placement.name,
                    "placement references an unknown outline",
                ));
            }
            let handle = self.document.add_placement(pending.placement)?;
            if let Some(record) = self.document.placement(&id).cloned() {
                self.document.source.placements.insert(
                    handle,
                    PlacementSource {
                        record,
                        leading: pending.leading,
                        lines: pending.lines,
                    },
                );
            }
        }

        let busbar = &self.config.busbar;
        let flags: Vec<(String, bool)> = self
            .document
            .outlines()
            .filter(|o| o.component_type == ComponentType::Busbar)
            .map(|o| {
                let raised = (o.height - busbar.high_height).abs() < (o.height - busbar.low_height).abs();
                (o.name.clone(), raised)
            })
            .collect();
        for (name, raised) in flags {
            self.document.set_raised_flag(&name, raised);
        }
        Ok(())
    }
}

/// Index of the line closing the section opened at `start`
fn find_section_end(lines: &[Line<'_>], start: usize, kind: &SectionKind) -> Result<usize> {
    for (offset, line) in lines[start + 1..].iter().enumerate() {
        match parse_marker(line.text) {
            Some(Marker::End { keyword }) => {
                if keyword.eq_ignore_ascii_case(kind.keyword()) {
                    return Ok(start + 1 + offset);
                }
                return Err(IdfError::parse(
                    kind.display_name(),
                    line.number,
                    line.text.trim(),
                    format!("end marker does not match open section, expected {}", kind.end_marker()),
                ));
            }
            Some(Marker::Start { .. }) if !matches!(kind, SectionKind::Other(_)) => {
                return Err(IdfError::parse(
                    kind.display_name(),
                    line.number,
                    line.text.trim(),
                    "section opened before the previous one was closed",
                ));
            }
            _ => {}
        }
    }
    Err(IdfError::parse(
        kind.display_name(),
        lines[start].number,
        lines[start].text.trim(),
        format!("section is not closed, expected {}", kind.end_marker()),
    ))
}

fn owned(section: &[Line<'_>]) -> Vec<String> {
    section.iter().map(|l| l.text.to_string()).collect()
}

fn joined(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect::<Vec<_>>().join(" ")
}

fn fields<'a>(line: Line<'a>, section: &str) -> Result<Vec<Token<'a>>> {
    tokenize(line.text)
        .ok_or_else(|| IdfError::parse(section, line.number, line.text.trim(), "unbalanced quotes"))
}

/// Tokenized data records between the markers, comments skipped
fn records<'a>(section: &[Line<'a>], name: &str) -> Result<Vec<(usize, Vec<Token<'a>>)>> {
    section[1..section.len() - 1]
        .iter()
        .filter(|l| !is_comment(l.text))
        .map(|l| Ok((l.number, fields(*l, name)?)))
        .collect()
}

fn number(token: &Token<'_>, section: &str, line: usize) -> Result<f64> {
    match token.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IdfError::parse(section, line, token.text, "expected a number")),
    }
}

/// Outline point records `loop x y angle`; at least one is required
fn vertices(records: &[(usize, Vec<Token<'_>>)], section: &str, lines: &[Line<'_>]) -> Result<Vec<Vertex>> {
    if records.is_empty() {
        return Err(IdfError::parse(
            section,
            lines[lines.len() - 1].number,
            "",
            "outline has no points",
        ));
    }
    records
        .iter()
        .map(|(line, tokens)| {
            if tokens.len() != 4 {
                return Err(IdfError::parse(
                    section,
                    *line,
                    joined(tokens),
                    "expected loop, x, y and angle",
                ));
            }
            let loop_label = tokens[0]
                .text
                .parse::<u32>()
                .map_err(|_| IdfError::parse(section, *line, tokens[0].text, "expected a loop label"))?;
            Ok(Vertex {
                loop_label,
                x: number(&tokens[1], section, *line)?,
                y: number(&tokens[2], section, *line)?,
                angle: number(&tokens[3], section, *line)?,
            })
        })
        .collect()
}
