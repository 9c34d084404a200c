//! Transform engine tests on a parsed panel

mod common;

use common::builders::sample_panel;
use common::{catalog, read};
use idfrust::{BusbarSettings, BusbarSpec, IdFamily, IdfError, TranslateTarget};

#[test]
fn test_remove_shared_outline_only_with_last_placement() {
    let mut doc = read(&sample_panel().build());
    assert!(!doc.remove_placement("STR001").unwrap());
    assert!(doc.outline("String A").is_some());
    assert!(doc.remove_placement("STR002").unwrap());
    assert!(doc.outline("String A").is_none());
    assert_eq!(doc.string_names(), vec!["String B"]);
    assert!(doc.validate().is_ok());
}

#[test]
fn test_ids_are_never_reused() {
    let settings = BusbarSettings::default();
    let mut doc = read(&sample_panel().build());
    doc.remove_placement("BB002").unwrap();
    let id = doc
        .add_busbar(&BusbarSpec::at(-500.0, -50.0, 0.0).named("sbar_001"), &settings)
        .unwrap();
    assert_eq!(id, "BB003");

    doc.remove_placement("STR003").unwrap();
    assert_eq!(doc.next_id(IdFamily::String), "STR004");
}

#[test]
fn test_failed_batch_rename_changes_nothing() {
    let mut doc = read(&sample_panel().build());
    let err = doc
        .rename_strings([("String A", "String Z"), ("String Q", "String Y")])
        .unwrap_err();
    assert!(matches!(err, IdfError::NotFound { .. }));
    assert_eq!(doc.string_names(), vec!["String A", "String B"]);
    assert_eq!(doc.placement("STR001").unwrap().name, "String A");
}

#[test]
fn test_busbar_rename_keeps_height_flag() {
    let settings = BusbarSettings::default();
    let mut doc = read(&sample_panel().build());
    doc.set_busbar_raised("sbar_001", true, &settings).unwrap();
    doc.rename_outline("sbar_001", "sbar_main").unwrap();
    assert_eq!(doc.is_busbar_raised("sbar_main"), Some(true));
    assert_eq!(doc.placement_ids_of("sbar_main"), vec!["BB001", "BB002"]);
    assert_eq!(doc.busbar_names(), vec!["sbar_main"]);
}

#[test]
fn test_height_toggle_roundtrips_through_file() {
    let settings = BusbarSettings::default();
    let mut doc = read(&sample_panel().build());
    assert!(doc.toggle_busbar_height("sbar_001", &settings).unwrap());
    let out = idfrust::serialize(&doc);
    assert!(out.contains("\"sbar_001\" BUSBAR MM 0.8"));
    let reparsed = read(&out);
    assert_eq!(reparsed.is_busbar_raised("sbar_001"), Some(true));
}

#[test]
fn test_rotate_twice_accumulates() {
    let mut doc = read(&sample_panel().build());
    let before = doc.placement("STR001").unwrap().placement;
    assert_eq!(doc.rotate("STR001", 90.0).unwrap(), 90.0);
    assert_eq!(doc.rotate("STR001", 180.0).unwrap(), 90.0);
    let after = doc.placement("STR001").unwrap().placement;
    assert_eq!(after.rotation, 180.0);
    let history = doc.history("STR001").unwrap();
    assert_eq!((history.previous(), history.current()), (Some(90.0), 180.0));
    // a half turn about the outline centre moves the origin
    assert!((after.x - before.x).abs() > 1.0);
}

#[test]
fn test_translate_all_leaves_board() {
    let mut doc = read(&sample_panel().build());
    let board = doc.board().unwrap().clone();
    assert_eq!(doc.translate(&TranslateTarget::All, 10.0, 10.0).unwrap(), 5);
    assert_eq!(doc.board().unwrap(), &board);
    assert_eq!(doc.placement("BB001").unwrap().placement.x, -890.0);
}

#[test]
fn test_auto_layout_inside_board() {
    let mut doc = read(&sample_panel().build());
    doc.auto_layout(20.0, 20.0, 15.0, &["STR001", "STR002", "STR003"], &catalog())
        .unwrap();
    let first = doc.placement("STR001").unwrap().placement;
    let second = doc.placement("STR002").unwrap().placement;
    // String A lies at y0 = 192 in its own frame, so the origin sits below the slot
    assert!((first.x - (-980.0)).abs() < 1e-9);
    assert!((first.y - (-1580.0 - 192.0)).abs() < 1e-9);
    assert!((second.y - first.y - (182.0 + 15.0)).abs() < 1e-9);

    let board = doc.board().unwrap().bounds().unwrap();
    let boxes: Vec<_> = ["STR001", "STR002", "STR003"]
        .iter()
        .map(|id| {
            let p = doc.placement(id).unwrap();
            let outline = doc.outline(&p.name).unwrap();
            p.placement.transform().apply_bounds(outline.positions().iter()).unwrap()
        })
        .collect();
    for (i, a) in boxes.iter().enumerate() {
        assert!(a.min.x >= board.min.x && a.max.y <= board.max.y + 1e-9);
        for b in &boxes[i + 1..] {
            let apart = a.max.x <= b.min.x + 1e-6
                || b.max.x <= a.min.x + 1e-6
                || a.max.y <= b.min.y + 1e-6
                || b.max.y <= a.min.y + 1e-6;
            assert!(apart, "{} overlaps {}", a, b);
        }
    }
}

#[test]
fn test_auto_layout_rejects_busbars() {
    let mut doc = read(&sample_panel().build());
    let before = doc.placement("STR001").unwrap().placement;
    assert!(matches!(
        doc.auto_layout(0.0, 0.0, 5.0, &["STR001", "BB001"], &catalog()),
        Err(IdfError::Validation { .. })
    ));
    assert_eq!(doc.placement("STR001").unwrap().placement, before);
}
