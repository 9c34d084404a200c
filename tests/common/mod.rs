//! Shared test utilities for idfrust integration tests.
//!
//! Text builders for sample board files plus read/roundtrip helpers that all
//! test crates import via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use idfrust::{serialize, CellTypeCatalog, IdfDocument, IdfReader, StringParameters};

/// Parameters of the string every sample file carries
pub fn sample_string() -> StringParameters {
    StringParameters::new("M10 HC", 5, 2.0, 10.0, 10.0)
}

pub fn catalog() -> CellTypeCatalog {
    CellTypeCatalog::standard()
}

/// Parse text, panicking with the error on failure
pub fn read(text: &str) -> IdfDocument {
    match IdfReader::from_str(text).read() {
        Ok(doc) => doc,
        Err(e) => panic!("failed to read sample: {e}"),
    }
}

/// Parse and serialize without edits
pub fn roundtrip(text: &str) -> String {
    serialize(&read(text))
}

/// Index of the first line containing `needle`
pub fn line_of(text: &str, needle: &str) -> Option<usize> {
    text.lines().position(|l| l.contains(needle))
}
