// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recoverable ingestion failures. Each variant ends up as a stored
//! rejection; fatal datastore errors travel as `anyhow::Error` instead.

use thiserror::Error;

/// A structural failure that rejects the whole file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON data is not an array of transactions")]
    NotAnArray,

    #[error("JSON element {index} is not an object")]
    NotAnObject { index: usize },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Xml(String),

    #[error("XML document has no root element")]
    MissingRoot,

    #[error("Unclosed XML element <{0}>")]
    UnclosedElement(String),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Xml(err.to_string())
    }
}

/// Why a record (or a whole file) was not accepted. `Display` is the
/// reason text persisted with the rejected record.
#[derive(Error, Debug)]
pub enum Rejection {
    #[error("Malformed record (missing fields or invalid amount)")]
    Malformed,

    #[error("Invalid card number (Luhn check failed)")]
    ChecksumFailed,

    #[error("Unrecognized card type")]
    UnrecognizedCardType,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to parse file: {0}")]
    ParseFailure(#[from] ParseError),
}
