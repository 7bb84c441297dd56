// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Format parsers. Each one turns a whole file into `ParsedRecord`s or
//! fails the whole file with a `ParseError`.

pub mod csv_parser;
pub mod json_parser;
pub mod xml_parser;

use crate::error::ParseError;
use crate::models::ParsedRecord;
use std::path::Path;

pub use csv_parser::parse_csv;
pub use json_parser::parse_json;
pub use xml_parser::parse_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Xml,
}

/// Declared MIME tag -> format. Adding a format is a table entry.
const MIME_TABLE: &[(&str, FileFormat)] = &[
    ("text/csv", FileFormat::Csv),
    ("application/json", FileFormat::Json),
    ("text/xml", FileFormat::Xml),
    ("application/xml", FileFormat::Xml),
];

const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("xml", "application/xml"),
];

pub const FALLBACK_MIME: &str = "application/octet-stream";

impl FileFormat {
    /// Resolve a declared tag, ignoring case and any `; charset=...` suffix.
    pub fn from_mime(tag: &str) -> Option<Self> {
        let essence = tag.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        MIME_TABLE
            .iter()
            .find(|(mime, _)| *mime == essence)
            .map(|(_, format)| *format)
    }

    pub fn parse(self, content: &str) -> Result<Vec<ParsedRecord>, ParseError> {
        match self {
            FileFormat::Csv => parse_csv(content),
            FileFormat::Json => parse_json(content),
            FileFormat::Xml => parse_xml(content),
        }
    }
}

/// Guess the MIME tag an upload would have been declared with.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}
