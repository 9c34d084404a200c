//! Serializer round trips: unedited files come back byte for byte and edits
//! touch only the records they change

mod common;

use common::builders::sample_panel;
use common::{catalog, line_of, read, roundtrip, sample_string};
use idfrust::{diff, serialize, DiffLineKind, IdfReader, IdfWriter, TranslateTarget};

#[test]
fn test_unedited_sample_is_identical() {
    let text = sample_panel().build();
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_crlf_is_preserved() {
    let text = sample_panel().crlf().build();
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_missing_trailing_newline_is_preserved() {
    let mut text = sample_panel().build();
    text.pop();
    assert_eq!(roundtrip(&text), text);
}

#[test]
fn test_comments_and_unknown_sections_survive() {
    let text = sample_panel()
        .raw(&[
            "# exported by the panel line",
            ".NOTES",
            "100 100 12 \"do not edit\"",
            ".END_NOTES",
        ])
        .build();
    assert_eq!(roundtrip(&text), text);

    let mut doc = read(&text);
    doc.translate(&TranslateTarget::All, 1.0, 0.0).unwrap();
    let out = serialize(&doc);
    assert!(out.contains("# exported by the panel line\n.NOTES\n100 100 12 \"do not edit\"\n.END_NOTES\n"));
}

#[test]
fn test_bytes_roundtrip() {
    let text = sample_panel().build();
    let doc = IdfReader::from_bytes(text.as_bytes()).read().unwrap();
    assert_eq!(IdfWriter::new(&doc).write_to_vec(), text.as_bytes());

    let mut sink = Vec::new();
    IdfWriter::new(&doc).write_to_writer(&mut sink).unwrap();
    assert_eq!(sink, text.as_bytes());
}

#[test]
fn test_translate_changes_only_placement_records() {
    let text = sample_panel().build();
    let mut doc = read(&text);
    doc.translate(&TranslateTarget::Placement("STR002".into()), 25.0, -5.0)
        .unwrap();
    let out = serialize(&doc);

    let lines = diff(&text, &out, "before", "after");
    let removed: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == DiffLineKind::Removed)
        .map(|l| l.text.as_str())
        .collect();
    let added: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == DiffLineKind::Added)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(removed, vec!["--900.0 -600.0 0.0 0.0 TOP PLACED"]);
    assert_eq!(added, vec!["+-875.0 -605.0 0.0 0.0 TOP PLACED"]);
}

#[test]
fn test_edit_then_reparse() {
    let mut doc = read(&sample_panel().build());
    doc.rotate("STR001", 90.0).unwrap();
    doc.remove_outline("String B").unwrap();
    let name = doc
        .define_string(&sample_string(), Some("String C"), &catalog())
        .unwrap();
    let id = doc.add_string(&name, -500.0, -500.0, 180.0).unwrap();

    let out = serialize(&doc);
    let reparsed = read(&out);
    assert_eq!(reparsed.string_names(), vec!["String A", "String C"]);
    assert_eq!(reparsed.placement(&id).unwrap().placement.rotation, 180.0);
    let (a, b) = (
        reparsed.placement("STR001").unwrap().placement,
        doc.placement("STR001").unwrap().placement,
    );
    assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
    assert_eq!(a.rotation, 90.0);
    assert!(reparsed.placement("STR003").is_none());
    assert_eq!(serialize(&reparsed), out);

    // the new outline goes after the last outline, before placements
    let string_c = line_of(&out, "\"String C\" STRING").unwrap();
    let placement = line_of(&out, ".PLACEMENT").unwrap();
    let string_a = line_of(&out, "\"String A\" STRING MM").unwrap();
    assert!(string_a < string_c && string_c < placement);
}

#[test]
fn test_serialization_is_deterministic() {
    let mut doc = read(&sample_panel().build());
    doc.translate(&TranslateTarget::All, 0.5, 0.25).unwrap();
    assert_eq!(serialize(&doc), serialize(&doc));
}
